fn main() -> anyhow::Result<()> {
    l2data::cli::run_cli()
}
