//! Throughput fields as written by earlier tooling.
//!
//! Unvalidated form input could store `NaN`, which JSON encodes as `null`.
//! Such values load as `NaN`; serde_json writes them back as `null`.

use serde::{Deserialize, Deserializer};

pub fn deserialize<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(f64::NAN))
}
