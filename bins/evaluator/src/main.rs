use std::env;
use std::process;

use alloy::primitives::hex;
use interpreter::evaluate;
use primitives::evm_types::{ExecutionContext, SizeHints};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut args = env::args().skip(1);
    let Some(code_hex) = args.next() else {
        eprintln!("usage: evaluator <bytecode-hex> [calldata-hex]");
        process::exit(2);
    };
    let bytecode = decode_arg("bytecode", &code_hex);

    let mut context = ExecutionContext::default();
    if let Some(data_hex) = args.next() {
        context.calldata = decode_arg("calldata", &data_hex).into();
    }

    let out = evaluate(&context, &bytecode, SizeHints::default());
    println!("success: {}", out.success);
    println!("data: 0x{}", hex::encode(&out.data));
}

fn decode_arg(name: &str, value: &str) -> Vec<u8> {
    match hex::decode(value.trim_start_matches("0x")) {
        Ok(bytes) => bytes,
        Err(err) => {
            eprintln!("bad {name} hex: {err}");
            process::exit(2);
        }
    }
}
