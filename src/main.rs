use clap::Parser;
use text_faces::cli::Cli;
use text_faces::run;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let mut stdout = std::io::stdout().lock();

    if let Err(e) = run(&cli, &mut stdout) {
        log::error!("{}", e);
        std::process::exit(1);
    }
}
