fn main() -> anyhow::Result<()> {
    langwitch_lib::run()
}
