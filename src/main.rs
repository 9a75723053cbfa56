use std::io::{self, Stdout};
use std::process::ExitCode;

use crossterm::cursor::{Hide, Show};
use crossterm::event::{self, Event};
use crossterm::terminal::{self, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::ExecutableCommand;
use log::{debug, error, info};

use maze_game::config::{self, Config};
use maze_game::input::{command_for, Command};
use maze_game::render::Renderer;
use maze_game::{MazeError, MoveOutcome, Session};

fn main() -> ExitCode {
    if std::env::var("MAZE_LOG").is_ok() {
        let e = env_logger::Env::new()
            .filter("MAZE_LOG")
            .write_style("MAZE_LOG_STYLE");
        env_logger::init_from_env(e);
    }

    let matches = config::command().get_matches();
    let result = Config::from_matches(&matches).and_then(|config| {
        debug!("maze options: {:?}", config);
        play(&config)
    });

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            eprintln!("maze: {e}");
            ExitCode::FAILURE
        }
    }
}

fn play(config: &Config) -> Result<(), MazeError> {
    let mut stdout = io::stdout();
    terminal::enable_raw_mode()?;
    stdout.execute(EnterAlternateScreen)?;
    stdout.execute(Hide)?;

    let result = run(&mut stdout, config);

    stdout.execute(Show)?;
    stdout.execute(LeaveAlternateScreen)?;
    terminal::disable_raw_mode()?;
    result
}

fn run(stdout: &mut Stdout, config: &Config) -> Result<(), MazeError> {
    let (term_w, term_h) = terminal::size()?;
    let size = config.resolve_size(term_w, term_h);
    let mut rng = config.rng();
    let mut session = Session::generate(size, &mut rng);
    let mut renderer = Renderer::new(size, config.color);
    renderer.render(stdout, &session)?;

    loop {
        let event = event::read()?;
        if let Event::Resize(..) = event {
            renderer.invalidate();
        }
        match command_for(&event) {
            Some(Command::Quit) => return Ok(()),
            Some(Command::NewGame) => {
                session.regenerate(&mut rng);
                info!("new game requested");
            }
            Some(Command::Move(dir)) => {
                if let MoveOutcome::Moved { won: true, .. } = session.move_player(dir) {
                    info!("player reached the exit");
                }
            }
            None => {}
        }
        renderer.render(stdout, &session)?;
    }
}
