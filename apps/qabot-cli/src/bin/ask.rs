use std::env;

use qabot_chat::Responder;

fn main() -> anyhow::Result<()> {
    qabot_cli::init_tracing();
    let (prog, query) = qabot_cli::split_args(env::args(), "qabot-ask");
    if query.trim().is_empty() {
        eprintln!("Usage: {} <question>", prog);
        eprintln!("Example: {} 'what is your name'", prog);
        std::process::exit(1);
    }
    let settings = qabot_cli::load_settings()?;
    let responder = match Responder::open(&settings) {
        Ok(r) => r,
        Err(e) => return qabot_cli::finish(Err(e)),
    };
    let reply = responder.respond(&query);
    println!("{}", qabot_cli::describe_reply(&reply, responder.settings().threshold));
    Ok(())
}
