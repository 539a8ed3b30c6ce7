use strum::Display;
use ttdata_client::ApiResponse;

use crate::logging::print_stage;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "lowercase")]
pub enum StageStatus {
    Pass,
    Failed,
}

impl From<bool> for StageStatus {
    fn from(ok: bool) -> Self {
        if ok {
            StageStatus::Pass
        } else {
            StageStatus::Failed
        }
    }
}

/// Print and log whether `response` passed, without interrupting the run.
pub fn check_status(stage: &str, response: &ApiResponse) -> StageStatus {
    let status = StageStatus::from(response.ok());
    print_stage(stage, status);
    status
}

/// Stage outcomes of one scenario, in the order they ran.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ScenarioReport {
    stages: Vec<(String, StageStatus)>,
}

impl ScenarioReport {
    pub fn record(&mut self, stage: impl Into<String>, status: StageStatus) {
        self.stages.push((stage.into(), status));
    }

    pub fn stages(&self) -> &[(String, StageStatus)] {
        &self.stages
    }

    pub fn status_of(&self, stage: &str) -> Option<StageStatus> {
        self.stages
            .iter()
            .find(|(name, _)| name == stage)
            .map(|(_, status)| *status)
    }

    pub fn failures(&self) -> impl Iterator<Item = &str> {
        self.stages
            .iter()
            .filter(|(_, status)| *status == StageStatus::Failed)
            .map(|(name, _)| name.as_str())
    }

    pub fn passed(&self) -> bool {
        self.failures().next().is_none()
    }

    pub fn merge(&mut self, other: ScenarioReport) {
        self.stages.extend(other.stages);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_displays_lowercase() {
        assert_eq!(StageStatus::Pass.to_string(), "pass");
        assert_eq!(StageStatus::Failed.to_string(), "failed");
    }

    #[test]
    fn report_lists_failures_in_order() {
        let mut report = ScenarioReport::default();
        report.record("uploaddata", StageStatus::Failed);
        report.record("getshareddata", StageStatus::Pass);

        let mut other = ScenarioReport::default();
        other.record("uploaddata batch 0", StageStatus::Failed);
        report.merge(other);

        assert!(!report.passed());
        assert_eq!(
            report.failures().collect::<Vec<_>>(),
            vec!["uploaddata", "uploaddata batch 0"]
        );
        assert_eq!(report.status_of("getshareddata"), Some(StageStatus::Pass));
        assert_eq!(report.status_of("register"), None);
    }
}
