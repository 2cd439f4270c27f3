fn main() -> anyhow::Result<()> {
    buildart::cli::run_cli()
}
