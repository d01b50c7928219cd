fn main() -> anyhow::Result<()> {
    sourcing_scrape::cli::run()
}
