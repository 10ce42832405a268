use super::TransformKind;
use handoff_caller::{owned, prefix_no_copy, raw_parts, CallerBuffer};
use handoff_core::{Convention, OwnedVariant};

/// One round trip of `text`. Every handle is dropped, and so released through
/// its own convention, before this returns.
pub fn execute(kind: TransformKind, text: &str) -> eyre::Result<()> {
    let input = CallerBuffer::new(text)?;

    match kind {
        TransformKind::A | TransformKind::AOwned | TransformKind::ABorrowed => {
            let variant = match kind {
                TransformKind::AOwned => OwnedVariant::OwnedToOwned,
                TransformKind::ABorrowed => OwnedVariant::BorrowedToBorrowed,
                _ => OwnedVariant::BorrowedToOwned,
            };
            let out = owned(variant, &input)?;
            println!("{}", out.to_str()?);
            eprintln!(
                "{} via {}: released with {}",
                Convention::Owned,
                variant.symbol(),
                Convention::Owned.release_symbol().unwrap_or("-")
            );
        }
        TransformKind::B => {
            let out = raw_parts(&input)?;
            println!("{}", out.to_str()?);
            eprintln!(
                "{}: len {} cap {}, released with {}",
                Convention::RawParts,
                out.len(),
                out.capacity(),
                Convention::RawParts.release_symbol().unwrap_or("-")
            );
        }
        TransformKind::C => {
            let prefix = prefix_no_copy(&input)?;
            println!("{}", prefix.to_str()?);
            eprintln!(
                "{}: len {} of {}, aliases input: {}, nothing to release",
                Convention::NoCopy,
                prefix.len(),
                input.len(),
                prefix.starts_at_input()
            );
        }
    }
    Ok(())
}
