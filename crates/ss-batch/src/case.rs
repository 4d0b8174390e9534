use ss_engine::Directive;

/// One fully resolved scenario of a batch.
#[derive(Debug, Clone, PartialEq)]
pub struct Case {
    /// Stable identifier derived from the case's values, never from run order
    pub id: String,
    /// 0-based position in the plan
    pub index: usize,
    /// Value of the aggregate's first column for this case
    pub independent_value: f64,
    /// Configuration writes applied in order before the run
    pub directives: Vec<Directive>,
}

impl Case {
    pub fn directive_lines(&self) -> Vec<String> {
        self.directives.iter().map(ToString::to_string).collect()
    }
}
