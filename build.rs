use std::env;
use std::fs::File;
use std::path::Path;
use std::io::Write;
use rand_mt::Mt64;

fn main() {
    let out_dir = env::var_os("OUT_DIR").unwrap();
    let lookup_file = Path::new(&out_dir).join("lookup.rs");
    let zobrist_file = Path::new(&out_dir).join("zobrist_keys.rs");

    let processed_consts = BuildPreprocessor::process();

    let mut file = File::create(lookup_file).unwrap();
    writeln!(&mut file, "impl Bitboard {{").unwrap();
    inject_array(
        &mut file,
        "pub const KNIGHT_ATTACKS: [Bitboard; 64]",
        &processed_consts.knight_attacks,
        Some("Bitboard")
    );
    inject_array(
        &mut file,
        "pub const KING_ATTACKS: [Bitboard; 64]",
        &processed_consts.king_attacks,
        Some("Bitboard")
    );
    inject_2d_array(
        &mut file,
        "pub const RAYS: [[Bitboard; 64]; 8]",
        Vec::from(processed_consts.rays.map(Vec::from)),
        Some("Bitboard")
    );
    writeln!(&mut file, "}}").unwrap();

    file = File::create(zobrist_file).unwrap();
    writeln!(&mut file, "impl ZobristHasher {{").unwrap();
    inject_array(
        &mut file,
        "pub const ZOBRIST_KEYS: [u64; 781]",
        &BuildPreprocessor::initialize_zobrist_keys(),
        None
    );
    writeln!(&mut file, "}}").unwrap();

    println!("cargo:rerun-if-changed=build.rs");
}

fn inject_array<T: ToString>(file: &mut File, declaration: &str, array: &[T], constructor: Option<&str>) {
    writeln!(file, "{} = [", declaration).unwrap();
    for value in array {
        write!(file, "{}, ", match constructor {
            Some(c) => c.to_owned() + "(" + &value.to_string() + ")",
            None => value.to_string()
        }).unwrap();
    }
    writeln!(file, "];").unwrap();
}

fn inject_2d_array<T: ToString>(file: &mut File, declaration: &str, array: Vec<Vec<T>>, constructor: Option<&str>) {
    writeln!(file, "{} = [", declaration).unwrap();
    for slice in array {
        write!(file, "[").unwrap();
        for value in slice {
            write!(file, "{}, ", match constructor {
                Some(c) => c.to_owned() + "(" + &value.to_string() + ")",
                None => value.to_string()
            }).unwrap();
        }
        writeln!(file, "], ").unwrap();
    }
    writeln!(file, "];").unwrap();
}

struct BuildPreprocessor {
    pub knight_attacks: Vec<u64>,
    pub king_attacks: Vec<u64>,
    pub rays: [[u64; 64]; 8],
}

impl BuildPreprocessor {
    pub fn process() -> BuildPreprocessor {
        BuildPreprocessor {
            knight_attacks: Self::process_knight_moves(),
            king_attacks: Self::process_king_moves(),
            rays: Self::process_rays(),
        }
    }

    fn process_knight_moves() -> Vec<u64> {
        let knight_shifts: [fn(u64) -> u64; 8] = [
            |bb| (bb << 10) & !0x303030303030303,
            |bb| (bb >> 10) & !0xc0c0c0c0c0c0c0c0,
            |bb| (bb << 17) & !0x101010101010101,
            |bb| (bb >> 17) & !0x8080808080808080,
            |bb| (bb << 15) & !0x8080808080808080,
            |bb| (bb >> 15) & !0x101010101010101,
            |bb| (bb << 6) & !0xc0c0c0c0c0c0c0c0,
            |bb| (bb >> 6) & !0x303030303030303,
        ];
        Self::apply_shifts(&knight_shifts)
    }

    fn process_king_moves() -> Vec<u64> {
        let king_shifts: [fn(u64) -> u64; 8] = [
            |bb| (bb >> 1) & !0x8080808080808080,
            |bb| (bb << 1) & !0x101010101010101,
            |bb| (bb << 7) & !0x8080808080808080,
            |bb| (bb >> 7) & !0x101010101010101,
            |bb| (bb << 9) & !0x101010101010101,
            |bb| (bb >> 9) & !0x8080808080808080,
            |bb| bb << 8,
            |bb| bb >> 8,
        ];
        Self::apply_shifts(&king_shifts)
    }

    fn apply_shifts(shifts: &[fn(u64) -> u64]) -> Vec<u64> {
        (0..64)
            .map(|sq| {
                let origin = 1u64 << sq;
                shifts.iter().fold(0u64, |attacks, shift| attacks | shift(origin))
            })
            .collect()
    }

    // Ray order matters: even indices walk towards higher squares, odd ones
    // towards lower squares. Slider attack generation relies on it.
    fn process_rays() -> [[u64; 64]; 8] {
        let shifts: [fn(u64) -> u64; 8] = [
            |b| (b << 1) & !0x101010101010101,
            |b| (b >> 1) & !0x8080808080808080,
            |b| b << 8,
            |b| b >> 8,
            |b| (b << 7) & !0x8080808080808080,
            |b| (b >> 7) & !0x101010101010101,
            |b| (b << 9) & !0x101010101010101,
            |b| (b >> 9) & !0x8080808080808080
        ];

        let mut results = [[0u64; 64]; 8];
        for sq in 0..64 {
            let origin = 1u64 << sq;
            for (i, shift) in shifts.iter().enumerate() {
                let mut ray = 0u64;
                let mut current = origin;
                while current != 0 {
                    current = shift(current);
                    ray |= current;
                }
                results[i][sq] = ray;
            }
        }
        results
    }

    pub fn initialize_zobrist_keys() -> [u64; 781] {
        let mut rng = Mt64::new_unseeded();
        [0u64; 781].map(|_| rng.next_u64())
    }
}
