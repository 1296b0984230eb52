//! Error boundary for rendering: a failed render yields a fallback view
//! instead of propagating, and the failure is logged.

use std::fmt::Display;

pub const FALLBACK_MESSAGE: &str = "Algo salió mal.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rendered<T> {
    View(T),
    Fallback(&'static str),
}

impl<T> Rendered<T> {
    pub fn is_fallback(&self) -> bool {
        matches!(self, Rendered::Fallback(_))
    }

    pub fn into_view(self) -> Option<T> {
        match self {
            Rendered::View(view) => Some(view),
            Rendered::Fallback(_) => None,
        }
    }
}

pub fn guard<T, E, F>(render: F) -> Rendered<T>
where
    E: Display,
    F: FnOnce() -> Result<T, E>,
{
    match render() {
        Ok(view) => Rendered::View(view),
        Err(e) => {
            tracing::error!("Render failed, showing fallback: {}", e);
            Rendered::Fallback(FALLBACK_MESSAGE)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn errors_become_the_fallback() {
        let ok: Rendered<u8> = guard(|| Ok::<_, String>(7));
        assert_eq!(ok.into_view(), Some(7));

        let failed: Rendered<u8> = guard(|| Err("boom"));
        assert!(failed.is_fallback());
        assert_eq!(failed, Rendered::Fallback(FALLBACK_MESSAGE));
    }
}
