fn main() -> anyhow::Result<()> {
    benchtab_cli::run()
}
