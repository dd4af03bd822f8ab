fn main() -> anyhow::Result<()> {
    bookings::Cli::run()
}
