pub fn execute(a: u8, b: u16, c: u32) -> eyre::Result<()> {
    let sum = handoff_caller::scalar_sum(a, b, c);
    tracing::debug!(a, b, c, sum, "handoff_scalar_sum returned");
    println!("{sum}");
    Ok(())
}
