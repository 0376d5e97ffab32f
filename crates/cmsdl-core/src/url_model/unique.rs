//! Collision handling: `name.ext` → `name (1).ext`, `name (2).ext`, ...

fn split_extension(name: &str) -> (&str, &str) {
    match name.rfind('.') {
        Some(dot) if dot > 0 => name.split_at(dot),
        _ => (name, ""),
    }
}

fn numbered(name: &str, n: u32) -> String {
    let (stem, ext) = split_extension(name);
    format!("{stem} ({n}){ext}")
}

/// `name` followed by its numbered variants, in the order they should be tried.
pub fn candidate_names(name: &str) -> impl Iterator<Item = String> + '_ {
    std::iter::once(name.to_string()).chain((1u32..).map(move |n| numbered(name, n)))
}
