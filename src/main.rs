fn main() -> anyhow::Result<()> {
    holdtick::run()?;
    Ok(())
}
