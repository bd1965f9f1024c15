//! Input receptor: V gene, CDR3, J gene
use serde::{Deserialize, Serialize};

/// A receptor as read from a table. Missing values are `None` and the
/// receptor is then reported as invalid instead of processed.
#[derive(Default, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Receptor {
    pub v: Option<String>,
    pub cdr3: Option<String>,
    pub j: Option<String>,
}

impl Receptor {
    pub fn new(v: &str, cdr3: &str, j: &str) -> Receptor {
        Receptor {
            v: Some(v.to_string()),
            cdr3: Some(cdr3.to_string()),
            j: Some(j.to_string()),
        }
    }

    /// The three fields, if they are all present and non-empty
    pub fn fields(&self) -> Option<(&str, &str, &str)> {
        let v = self.v.as_deref().filter(|s| !s.is_empty())?;
        let cdr3 = self.cdr3.as_deref().filter(|s| !s.is_empty())?;
        let j = self.j.as_deref().filter(|s| !s.is_empty())?;
        Some((v, cdr3, j))
    }
}

impl From<(&str, &str, &str)> for Receptor {
    fn from((v, cdr3, j): (&str, &str, &str)) -> Receptor {
        Receptor::new(v, cdr3, j)
    }
}
