use serde::{Deserialize, Serialize};

/// Traffic prediction model offered in the panel.
///
/// Selection is presentation state; the route payload does not carry it.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PredictionModel {
    #[default]
    #[serde(rename = "xgboost")]
    XgBoost,
    #[serde(rename = "random_forest")]
    RandomForest,
    #[serde(rename = "neural_network")]
    NeuralNetwork,
}

impl PredictionModel {
    pub const ALL: [PredictionModel; 3] = [
        PredictionModel::XgBoost,
        PredictionModel::RandomForest,
        PredictionModel::NeuralNetwork,
    ];

    pub fn id(self) -> &'static str {
        match self {
            PredictionModel::XgBoost => "xgboost",
            PredictionModel::RandomForest => "random_forest",
            PredictionModel::NeuralNetwork => "neural_network",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|m| m.id() == id.trim())
    }

    pub fn name(self) -> &'static str {
        match self {
            PredictionModel::XgBoost => "XGBoost",
            PredictionModel::RandomForest => "Random Forest",
            PredictionModel::NeuralNetwork => "Neural Network",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            PredictionModel::XgBoost => {
                "Extreme Gradient Boosting - A powerful ensemble learning method that builds \
                 sequential decision trees. Excels at handling non-linear patterns and feature \
                 interactions in traffic data. Best for overall accuracy and speed prediction."
            }
            PredictionModel::RandomForest => {
                "Random Forest - An ensemble method using multiple decision trees trained on \
                 random data subsets. Provides robust predictions and handles outliers well. \
                 Good balance between accuracy and interpretability for traffic patterns."
            }
            PredictionModel::NeuralNetwork => {
                "Deep Neural Network - A multi-layered network capable of learning complex \
                 temporal and spatial patterns. Captures intricate relationships in traffic \
                 flow. Best for discovering hidden patterns in large-scale traffic data."
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::PredictionModel;

    #[test]
    fn ids_round_trip() {
        for m in PredictionModel::ALL {
            assert_eq!(PredictionModel::from_id(m.id()), Some(m));
        }
        assert_eq!(PredictionModel::from_id("lstm"), None);
    }

    #[test]
    fn serde_uses_ids() {
        let m: PredictionModel = serde_json::from_str("\"random_forest\"").unwrap();
        assert_eq!(m, PredictionModel::RandomForest);
        assert_eq!(serde_json::to_string(&PredictionModel::XgBoost).unwrap(), "\"xgboost\"");
    }
}
