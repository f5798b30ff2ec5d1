fn main() -> anyhow::Result<()> {
    minimat::cli::run()
}
