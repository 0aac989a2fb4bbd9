//! Terminal front end: pick a game, then play it with start / move / status / end

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process;

use clap::Parser;
use tracing::error;
use tracing_subscriber::EnvFilter;

use chess_rules_core::render::render_board;
use chess_rules_core::{
    ChessGame, ChessService, Command, Database, Finish, GameId, GameSelection, Result,
};

#[derive(Parser)]
#[command(name = "chess_console")]
#[command(about = "Play chess in the terminal")]
#[command(version = "0.1.0")]
struct Args {
    /// SQLite file holding games in progress
    #[arg(short, long, value_name = "FILE", default_value = "chess_rules.db")]
    database: PathBuf,

    /// Keep games in memory only, nothing is written to disk
    #[arg(long)]
    memory: bool,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    if let Err(e) = run(&args) {
        error!(error = %e, "session aborted");
        println!("[ERROR] {}", e);
        process::exit(1);
    }
}

fn run(args: &Args) -> Result<()> {
    let db = if args.memory {
        Database::open_in_memory()?
    } else {
        Database::open(&args.database)?
    };
    let service = ChessService::new(db);

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    let Some((game_id, mut game)) = select_game(&service, &mut lines)? else {
        return Ok(());
    };

    print_start_message(game_id);

    loop {
        print!("> ");
        io::stdout().flush()?;

        let Some(line) = lines.next() else {
            break;
        };

        match execute(&service, &mut game, &line?) {
            Ok(command) if !command.is_playable() => break,
            Ok(Command::Move { .. }) if game.is_end() => {
                if let Some(winner) = game.winner() {
                    println!("Winner: {}", winner);
                }
                println!("Reopen game #{} and type 'end' to clear it.", game_id);
                break;
            }
            Ok(_) => {}
            Err(e) if e.is_persistence() => return Err(e),
            Err(e) => println!("[ERROR] {}", e),
        }
    }

    Ok(())
}

fn select_game<B: BufRead>(
    service: &ChessService,
    lines: &mut io::Lines<B>,
) -> Result<Option<(GameId, ChessGame)>> {
    loop {
        let ids = service.game_ids()?;
        let listed: Vec<String> = ids.iter().map(|id| id.to_string()).collect();
        println!("Saved games: [{}]", listed.join(", "));
        print!("Enter a game id or 'new': ");
        io::stdout().flush()?;

        let Some(line) = lines.next() else {
            return Ok(None);
        };

        match line?.parse::<GameSelection>() {
            Ok(GameSelection::New) => return service.create_game().map(Some),
            Ok(GameSelection::Existing(id)) if ids.contains(&id) => {
                return service.load_game(id).map(|game| Some((id, game)));
            }
            Ok(GameSelection::Existing(id)) => println!("[ERROR] No game with id {}", id),
            Err(e) => println!("[ERROR] {}", e),
        }
    }
}

fn print_start_message(game_id: GameId) {
    println!();
    println!("Chess game #{}", game_id);
    println!("========================================");
    println!("  start          show the board");
    println!("  move b2 b4     move a piece");
    println!("  status         show both scores");
    println!("  end            stop playing");
    println!();
}

fn execute(service: &ChessService, game: &mut ChessGame, line: &str) -> Result<Command> {
    let command: Command = line.parse()?;

    match command {
        Command::Start => print!("{}", render_board(game.board())),
        Command::Move { from, to } => {
            let outcome = service.play(game, from, to)?;
            if let Some(captured) = outcome.captured {
                println!("{} takes {} on {}", outcome.piece, captured, outcome.to);
            }
            print!("{}", render_board(game.board()));
        }
        Command::Status => {
            let score = game.calculate_score();
            println!("{}", score);
            if let Some(leader) = score.leader() {
                println!("{} leads by {:.1}", leader, score.margin(leader));
            }
        }
        Command::End => match service.finish(game)? {
            Finish::Undecided(score) => println!("{}", score),
            Finish::Decided(winner) => println!("Winner: {}", winner),
        },
    }

    Ok(command)
}
