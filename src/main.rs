use std::{
    io::{self, BufRead, Write},
    path::PathBuf,
    thread,
};

use anyhow::{anyhow, Result};
use clap::Parser;
use engine::{prelude::*, Client, Controller};

mod view;

pub const GAME_NAME: &str = "roguecore";

#[derive(Parser, Debug)]
#[command(name = GAME_NAME, about = "Play a roguelike world in the terminal")]
struct Args {
    #[arg(
        long,
        default_value = "data/world",
        help = "Directory with the map files and world.txt"
    )]
    world: PathBuf,

    #[arg(long, help = "IDM file overriding creature and item stats")]
    config: Option<PathBuf>,

    #[arg(
        long,
        default_value_t = 0,
        help = "Number of extra clients that log every turn"
    )]
    observers: usize,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("info"),
    )
    .init();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    let runtime = Runtime::load(&args.world, &config)?;

    let mut controller = Controller::new(runtime);
    let player = controller.attach();
    let observers: Vec<_> = (0..args.observers)
        .map(|_| observe(controller.attach()))
        .collect();
    let game = thread::spawn(move || controller.run());

    play(player)?;

    let status = game.join().map_err(|_| anyhow!("game thread panicked"))?;
    for handle in observers {
        if handle.join().is_err() {
            log::warn!("observer thread panicked");
        }
    }

    match status {
        Status::Lost => println!("You died."),
        Status::Ongoing => println!("Bye."),
    }
    Ok(())
}

/// Client that only logs what it sees.
fn observe(client: Client) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        while let Some(s) = client.recv() {
            let event = s.last_event.map_or("-".to_owned(), |e| e.to_string());
            log::info!(
                "{}: turn {} on {}, event {event}",
                client.id(),
                s.turn,
                s.level_name
            );
        }
    })
}

/// Interactive client reading commands from standard input.
fn play(client: Client) -> Result<()> {
    let mut lines = io::stdin().lock().lines();

    while let Some(snapshot) = client.recv() {
        print!("{}", view::render(&snapshot));
        if snapshot.status != Status::Ongoing {
            break;
        }

        let input = loop {
            print!("> ");
            io::stdout().flush()?;
            // End of input quits the game.
            let Some(line) = lines.next() else {
                break Input::Quit;
            };
            match view::parse_command(&line?) {
                Ok(input) => break input,
                Err(e) => println!("{e}"),
            }
        };

        if !client.send(input) || input == Input::Quit {
            break;
        }
    }

    Ok(())
}
