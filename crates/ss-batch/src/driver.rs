//! Batch driver.
//!
//! Cases run strictly in plan order against a single engine: a case's
//! directives are never applied before the previous case finished extracting
//! and saving. The first failure aborts the batch.

use std::time::Instant;

use ss_engine::SimulationEngine;
use ss_post::ResultExtractor;
use ss_results::BatchAggregate;

use crate::analysis::Analysis;
use crate::case::Case;
use crate::context::BatchRunContext;
use crate::error::{BatchError, BatchResult};
use crate::plan::ScenarioPlan;
use crate::progress::{BatchProgressEvent, BatchStage};
use crate::sink::{CaseRecord, CaseSink};

pub struct BatchDriver<'a> {
    plan: &'a ScenarioPlan,
    extractor: &'a ResultExtractor,
    analysis: Analysis,
}

struct Progress<'cb> {
    callback: Option<&'cb mut dyn FnMut(BatchProgressEvent)>,
    started: Instant,
    case_count: usize,
}

impl Progress<'_> {
    fn emit(&mut self, stage: BatchStage, case: Option<&Case>, message: Option<String>) {
        if let Some(cb) = self.callback.as_deref_mut() {
            let mut event = BatchProgressEvent::stage(stage, self.case_count, self.started.elapsed().as_secs_f64(), message);
            if let Some(case) = case {
                event.case_index = Some(case.index);
                event.case_id = Some(case.id.clone());
            }
            cb(event);
        }
    }
}

impl<'a> BatchDriver<'a> {
    pub fn new(plan: &'a ScenarioPlan, extractor: &'a ResultExtractor) -> Self {
        Self {
            plan,
            extractor,
            analysis: Analysis::default(),
        }
    }

    pub fn with_analysis(mut self, analysis: Analysis) -> Self {
        self.analysis = analysis;
        self
    }

    pub fn run<E: SimulationEngine, S: CaseSink + ?Sized>(&self, engine: &mut E, sink: &mut S) -> BatchResult<BatchAggregate> {
        self.run_with_progress(engine, sink, None)
    }

    pub fn run_with_progress<E: SimulationEngine, S: CaseSink + ?Sized>(
        &self,
        engine: &mut E,
        sink: &mut S,
        progress_cb: Option<&mut dyn FnMut(BatchProgressEvent)>,
    ) -> BatchResult<BatchAggregate> {
        let cases = self.plan.plan_cases();
        let mut progress = Progress {
            callback: progress_cb,
            started: Instant::now(),
            case_count: cases.len(),
        };
        progress.emit(
            BatchStage::Planning,
            None,
            Some(format!("{} case(s) in {} batch", cases.len(), self.plan.kind())),
        );

        let mut ctx = BatchRunContext::new(self.plan.independent_name(), self.extractor.row_columns());

        for case in &cases {
            tracing::info!(case = %case.id, index = case.index + 1, count = cases.len(), "case started");
            ctx.begin_case();
            self.run_case(case, engine, sink, &mut ctx, &mut progress)?;
            tracing::info!(case = %case.id, "case finished");
        }

        let aggregate = ctx.finalize()?;
        sink.finish_batch(&aggregate, ctx.completed_cases())?;
        progress.emit(
            BatchStage::Completed,
            None,
            Some(format!("{} case(s) completed", ctx.completed_cases().len())),
        );
        Ok(aggregate)
    }

    fn run_case<E: SimulationEngine, S: CaseSink + ?Sized>(
        &self,
        case: &Case,
        engine: &mut E,
        sink: &mut S,
        ctx: &mut BatchRunContext,
        progress: &mut Progress<'_>,
    ) -> BatchResult<()> {
        progress.emit(BatchStage::ApplyingDirectives, Some(case), None);
        for directive in &case.directives {
            tracing::debug!(case = %case.id, directive = %directive, "apply directive");
            engine.set_directive(directive).map_err(BatchError::engine(&case.id))?;
        }

        progress.emit(BatchStage::Running, Some(case), None);
        let extractor = self.extractor;
        // Modes are taken about the static position, before any dynamic run.
        if self.analysis.statics || self.analysis.modal {
            engine.run_statics().map_err(BatchError::engine(&case.id))?;
        }
        if self.analysis.modal {
            extractor
                .extract_modal(engine, ctx.results_mut())
                .map_err(BatchError::extract(&case.id))?;
        }
        if self.analysis.dynamics {
            engine.run_dynamics().map_err(BatchError::engine(&case.id))?;
        }

        progress.emit(BatchStage::Extracting, Some(case), None);
        extractor
            .extract_statics(&*engine, ctx.results_mut())
            .map_err(BatchError::extract(&case.id))?;
        if self.analysis.dynamics {
            extractor
                .extract_dynamics(&*engine, ctx.results_mut())
                .map_err(BatchError::extract(&case.id))?;
        }
        let row = extractor
            .monitor_row(&*engine, self.analysis.dynamics)
            .map_err(BatchError::extract(&case.id))?;

        ctx.check_row(case, &row)?;

        progress.emit(BatchStage::Saving, Some(case), None);
        let record = CaseRecord {
            case,
            results: ctx.results(),
            row: &row,
        };
        sink.save_case(&record, &*engine)?;

        ctx.push_row(case, row)?;
        Ok(())
    }
}
