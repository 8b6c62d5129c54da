//! SimulationRunner - runs every dataset topic through a configured engine.

use serde::Serialize;
use std::time::Instant;

use crate::adapters::dataset::QulacDataset;
use crate::config::{AppConfig, OutputFormat};
use crate::domain::clarify::{ClarifyEngine, RunReport};
use crate::domain::foundation::RandomSource;

use super::error::SimulationError;
use super::wiring::build_engine;

/// Run report with the effective configuration echoed under `config`.
#[derive(Debug, Clone, Serialize)]
pub struct SimulationOutput {
    pub config: AppConfig,
    #[serde(flatten)]
    pub report: RunReport,
}

impl SimulationOutput {
    pub fn render(&self, format: OutputFormat) -> Result<String, SimulationError> {
        match format {
            OutputFormat::Json => serde_json::to_string_pretty(self)
                .map_err(|e| SimulationError::Render(e.to_string())),
            OutputFormat::Yaml => {
                serde_yaml::to_string(self).map_err(|e| SimulationError::Render(e.to_string()))
            }
        }
    }
}

pub struct SimulationRunner {
    config: AppConfig,
    dataset: QulacDataset,
    engine: ClarifyEngine,
}

impl SimulationRunner {
    /// Validates the configuration, loads the dataset and wires the engine.
    pub async fn from_config(config: AppConfig) -> Result<Self, SimulationError> {
        // 1. Validate before touching files or the network
        config.validate()?;

        // 2. One random source shared by every stochastic collaborator
        let random = RandomSource::from_seed_option(config.simulation.seed);

        // 3. Load topics
        let dataset = QulacDataset::load(&config.simulation.dataset_path).await?;

        // 4. Wire the engine
        let engine = build_engine(&config, &random).await?;

        Ok(Self {
            config,
            dataset,
            engine,
        })
    }

    pub fn dataset(&self) -> &QulacDataset {
        &self.dataset
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub async fn run(&self) -> SimulationOutput {
        let started = Instant::now();
        let report = self
            .engine
            .run(self.config.simulation.epochs, self.dataset.topics())
            .await;

        tracing::info!(
            topics = report.topics.len(),
            aborted = report.aborted_topics(),
            ranker = %report.ranker,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Simulation finished"
        );

        SimulationOutput {
            config: self.config.clone(),
            report,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RankingStrategy;
    use std::io::Write;

    const DATASET: &str = r#"{
        "topic":      {"0": "apple", "1": "apple", "2": "jaguar"},
        "topic_id":   {"0": 1, "1": 1, "2": 2},
        "topic_desc": {"0": "", "1": "", "2": ""},
        "facet_desc": {"0": "apple fruit", "1": "apple company", "2": "jaguar car"},
        "facet_id":   {"0": "F1", "1": "F2", "2": "J1"},
        "question":   {"0": "is it the fruit?", "1": "the company?", "2": "the car?"},
        "answer":     {"0": "yes the fruit", "1": "no i want the company", "2": "yes"}
    }"#;

    fn dataset_file() -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(DATASET.as_bytes()).unwrap();
        file
    }

    fn config(path: &std::path::Path) -> AppConfig {
        let mut config = AppConfig::with_dataset(path);
        config.simulation.epochs = 2;
        config.simulation.seed = Some(7);
        config
    }

    #[tokio::test]
    async fn runs_every_topic_and_facet() {
        let file = dataset_file();
        let runner = SimulationRunner::from_config(config(file.path())).await.unwrap();
        assert_eq!(runner.dataset().topics().len(), 2);

        let output = runner.run().await;

        assert_eq!(output.report.topics.len(), 2);
        assert_eq!(output.report.aborted_topics(), 0);
        assert_eq!(output.report.epochs, 2);
        let apple = &output.report.topics[0];
        assert_eq!(apple.facets().len(), 2);
        assert!(apple.facets().iter().all(|f| f.dialogues.len() == 2));
    }

    #[tokio::test]
    async fn same_seed_reproduces_outcomes() {
        let file = dataset_file();
        let mut config = config(file.path());
        config.ranking.strategy = RankingStrategy::Random;

        let first = SimulationRunner::from_config(config.clone()).await.unwrap().run().await;
        let second = SimulationRunner::from_config(config).await.unwrap().run().await;

        assert_eq!(first.report.topics, second.report.topics);
    }

    #[tokio::test]
    async fn invalid_config_is_rejected_before_loading() {
        let mut config = AppConfig::with_dataset("/nonexistent/qulac.json");
        config.simulation.epochs = 0;
        assert!(matches!(
            SimulationRunner::from_config(config).await,
            Err(SimulationError::InvalidConfig(_))
        ));
    }

    #[tokio::test]
    async fn missing_dataset_fails() {
        let config = AppConfig::with_dataset("/nonexistent/qulac.json");
        assert!(matches!(
            SimulationRunner::from_config(config).await,
            Err(SimulationError::Dataset(_))
        ));
    }

    mod rendering {
        use super::*;

        #[tokio::test]
        async fn json_echoes_config_next_to_report() {
            let file = dataset_file();
            let output = SimulationRunner::from_config(config(file.path()))
                .await
                .unwrap()
                .run()
                .await;

            let json: serde_json::Value =
                serde_json::from_str(&output.render(OutputFormat::Json).unwrap()).unwrap();
            assert_eq!(json["config"]["simulation"]["epochs"], 2);
            assert_eq!(json["ranker"], "similarity");
            assert_eq!(json["topics"][0]["status"], "completed");
        }

        #[tokio::test]
        async fn yaml_is_parseable() {
            let file = dataset_file();
            let output = SimulationRunner::from_config(config(file.path()))
                .await
                .unwrap()
                .run()
                .await;

            let yaml = output.render(OutputFormat::Yaml).unwrap();
            let value: serde_yaml::Value = serde_yaml::from_str(&yaml).unwrap();
            assert!(value.get("config").is_some());
            assert!(value.get("topics").is_some());
        }
    }
}
