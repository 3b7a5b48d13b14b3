use hashbench::registry::CASES;
use serde::Serialize;

const VECTOR_OUTPUT_FILE: &str = "digest_vectors.json";

#[derive(Serialize)]
struct DigestVector {
    case: &'static str,
    input: String,
    output: String,
}

fn main() {
    println!("Computing digests of the benchmark input...");
    let vectors = CASES
        .iter()
        .map(|case| {
            let mut session = case.session();
            let digest = session
                .step()
                .unwrap_or_else(|e| panic!("{} failed: {}", case.name, e));
            DigestVector {
                case: case.name,
                input: hex::encode(vec![0u8; case.len()]),
                output: digest.to_hex(),
            }
        })
        .collect::<Vec<_>>();
    let json = serde_json::to_string_pretty(&vectors).unwrap();
    println!("{}", json);
    std::fs::write(VECTOR_OUTPUT_FILE, json).unwrap();
    println!("Digest vectors written to {}", VECTOR_OUTPUT_FILE);
}
