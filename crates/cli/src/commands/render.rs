use super::{MessageArgs, render_payload};

pub fn run(args: &MessageArgs) -> anyhow::Result<()> {
    println!("{}", render_payload(args)?);
    Ok(())
}
