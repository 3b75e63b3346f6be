use crate::errors::QueryError;
use bson::Bson;
use serde::{Deserialize, Serialize};

use super::ops;
use super::types::{Operation, Order};

// Serde-facing stage description. `format` takes a closure and has no JSON form.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum StageSerde {
    #[serde(rename = "$select")]
    Select(Vec<String>),
    #[serde(rename = "$filterIn")]
    FilterIn { field: String, values: Vec<Bson> },
    #[serde(rename = "$sortBy")]
    SortBy {
        field: String,
        #[serde(default = "default_order")]
        order: String,
    },
    #[serde(rename = "$limit")]
    Limit(usize),
    #[serde(rename = "$or")]
    Or(Vec<StageSerde>),
    #[serde(rename = "$and")]
    And(Vec<StageSerde>),
}

fn default_order() -> String {
    "asc".to_string()
}

impl TryFrom<StageSerde> for Operation {
    type Error = QueryError;
    fn try_from(stage: StageSerde) -> Result<Self, Self::Error> {
        use StageSerde as S;
        Ok(match stage {
            S::Select(fields) => ops::select(fields),
            S::FilterIn { field, values } => ops::filter_in(field, values),
            S::SortBy { field, order } => {
                let order: Order = order.parse().unwrap_or(Order::Desc);
                ops::sort_by(field, order)
            }
            S::Limit(n) => ops::limit(n),
            S::Or(stages) => {
                require_star("$or")?;
                ops::or(stages.into_iter().map(Self::try_from).collect::<Result<Vec<_>, _>>()?)
            }
            S::And(stages) => {
                require_star("$and")?;
                ops::and(stages.into_iter().map(Self::try_from).collect::<Result<Vec<_>, _>>()?)
            }
        })
    }
}

fn require_star(name: &str) -> Result<(), QueryError> {
    if super::is_star() {
        Ok(())
    } else {
        Err(QueryError::FeatureDisabled(format!("{name} requires extended operators")))
    }
}

/// Parse a JSON array of stages into operation descriptors, in source order.
///
/// # Errors
/// Returns an error if the JSON string cannot be parsed into stages, or if it
/// uses `$or`/`$and` while extended operators are disabled.
pub fn parse_pipeline_json(json: &str) -> Result<Vec<Operation>, QueryError> {
    let stages: Vec<StageSerde> = serde_json::from_str(json)?;
    stages.into_iter().map(Operation::try_from).collect()
}
