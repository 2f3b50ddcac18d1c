use certfile::cli::Session;
use certfile::config::{Settings, StoreArgs};
use certfile::{logging, storage::CertificateStore};
use clap::Parser;
use std::io;

/// Interactive add/view/search over the certificate verification file.
#[derive(Parser, Debug)]
#[command(name = "certfile", version, about)]
struct Cli {
    #[command(flatten)]
    store: StoreArgs,
}

fn main() -> anyhow::Result<()> {
    logging::init();
    let settings = Settings::from_store_args(Cli::parse().store);

    let stdin = io::stdin();
    let mut session = Session::new(stdin.lock(), io::stdout(), CertificateStore::new(settings.store));
    session.run()
}
