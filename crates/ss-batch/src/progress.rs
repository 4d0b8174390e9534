#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchStage {
    Planning,
    ApplyingDirectives,
    Running,
    Extracting,
    Saving,
    Completed,
}

impl BatchStage {
    pub fn label(self) -> &'static str {
        match self {
            BatchStage::Planning => "planning",
            BatchStage::ApplyingDirectives => "applying directives",
            BatchStage::Running => "running",
            BatchStage::Extracting => "extracting",
            BatchStage::Saving => "saving",
            BatchStage::Completed => "completed",
        }
    }
}

#[derive(Debug, Clone)]
pub struct BatchProgressEvent {
    pub stage: BatchStage,
    /// 0-based index of the case in flight
    pub case_index: Option<usize>,
    pub case_count: usize,
    pub case_id: Option<String>,
    pub elapsed_wall_s: f64,
    pub message: Option<String>,
}

impl BatchProgressEvent {
    pub fn stage(stage: BatchStage, case_count: usize, elapsed_wall_s: f64, message: Option<String>) -> Self {
        Self {
            stage,
            case_index: None,
            case_count,
            case_id: None,
            elapsed_wall_s,
            message,
        }
    }

    /// Fraction of cases finished when this event was emitted.
    pub fn fraction_complete(&self) -> f64 {
        if self.case_count == 0 {
            return 1.0;
        }
        match (self.stage, self.case_index) {
            (BatchStage::Completed, _) => 1.0,
            (_, Some(i)) => i as f64 / self.case_count as f64,
            (_, None) => 0.0,
        }
    }
}
