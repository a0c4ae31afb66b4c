use arbiter::console::{perft_report, Console};
use arbiter::position::Position;
use mimalloc::MiMalloc;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

fn main() {
    println!("arbiter v{}, by {}", env!("CARGO_PKG_VERSION"), env!("CARGO_PKG_AUTHORS"));

    let args: Vec<String> = std::env::args().collect();
    let perft_mode = args.len() >= 2 && args[1] == "perft";

    // Launches a perft test
    if perft_mode {
        let expected_format = "Expected : perft <depth> [<FEN>]";
        let depth = match args.get(2).map(|d| d.parse::<u32>()) {
            Some(Ok(d)) => d,
            _ => {
                eprintln!("{}", expected_format);
                std::process::exit(2);
            }
        };
        let position = match args.get(3) {
            None => Position::start(),
            Some(fen) => match Position::from_fen(fen) {
                Ok(p) => p,
                Err(e) => {
                    eprintln!("{}", e);
                    std::process::exit(2);
                }
            },
        };
        perft_report(&position, depth)
    } else {
        Console::default().run()
    }
}
