//! Diagnostic session: the fault queue, the working record and the run loop.

use ntd_fault_queue::{FaultQueue, FaultRecord, HeapArena, RecordArena};
use ntd_hal::{JigHardware, SEGMENT_COUNT};
use tracing::{error, info};

#[cfg(feature = "serde")]
use serde::Serialize;

use crate::error::{SessionError, SessionResult};
use crate::{DistressSignal, SegmentTester, SequencerConfig};

/// Totals of a full-panel run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct RunSummary {
    /// Segments actually tested.
    pub segments_tested: usize,
    /// Records stored during the run.
    pub faults_recorded: usize,
    /// Records lost to allocation failure during the run.
    pub faults_dropped: usize,
}

impl RunSummary {
    /// Whether the board passed.
    #[must_use]
    pub fn passed(&self) -> bool {
        self.faults_recorded == 0 && self.faults_dropped == 0
    }
}

/// One diagnostic session: owns the fault queue for its whole lifetime and
/// the working record the sequencer reuses between checks.
#[derive(Debug)]
pub struct DiagnosticSession<A: RecordArena = HeapArena> {
    config: SequencerConfig,
    queue: FaultQueue<A>,
    working: FaultRecord,
}

impl DiagnosticSession<HeapArena> {
    /// Start a session on the heap.
    ///
    /// # Errors
    ///
    /// See [`DiagnosticSession::start`].
    pub fn new(config: SequencerConfig) -> SessionResult<Self> {
        Self::start(config, HeapArena)
    }
}

impl<A: RecordArena> DiagnosticSession<A> {
    /// Start a session drawing fault storage from `arena`.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Config`] for an invalid configuration and
    /// [`SessionError::QueueUnavailable`] when the fault queue cannot be
    /// created. The latter is fatal.
    pub fn start(config: SequencerConfig, arena: A) -> SessionResult<Self> {
        config.validate()?;
        let queue = FaultQueue::create_in(arena)?;
        info!(settle_ms = config.settle_ms, "diagnostic session started");
        Ok(Self {
            config,
            queue,
            working: FaultRecord::working(0),
        })
    }

    /// Start a session, or halt the jig with a distress signal if the fault
    /// queue cannot be created. Never returns in that case.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Config`] for an invalid configuration.
    pub fn start_or_halt<H: JigHardware + ?Sized>(
        config: SequencerConfig,
        arena: A,
        hw: &mut H,
    ) -> SessionResult<Self> {
        let half_period_ms = config.halt_blink_half_period_ms;
        match Self::start(config, arena) {
            Ok(session) => Ok(session),
            Err(err @ SessionError::QueueUnavailable(_)) => {
                error!(error = %err, "fault queue unavailable, halting");
                DistressSignal::new(hw, half_period_ms).run_forever()
            }
            Err(err) => Err(err),
        }
    }

    /// Test one segment. Returns the number of records stored.
    ///
    /// Segments off the panel are ignored.
    pub fn run_segment<H: JigHardware + ?Sized>(&mut self, hw: &mut H, segment: u8) -> usize {
        let before = self.queue.len();
        SegmentTester::new(hw, &self.config).run_segment_test(
            segment,
            &mut self.working,
            &mut self.queue,
        );
        let recorded = self.queue.len().saturating_sub(before);
        info!(segment, recorded, "segment tested");
        recorded
    }

    /// Test every segment in panel order.
    pub fn run_all<H: JigHardware + ?Sized>(&mut self, hw: &mut H) -> RunSummary {
        let dropped_before = self.queue.dropped();
        let mut summary = RunSummary::default();
        for segment in (0..SEGMENT_COUNT).filter_map(|s| u8::try_from(s).ok()) {
            summary.faults_recorded = summary
                .faults_recorded
                .saturating_add(self.run_segment(hw, segment));
            summary.segments_tested = summary.segments_tested.saturating_add(1);
        }
        summary.faults_dropped = self.queue.dropped().saturating_sub(dropped_before);
        info!(
            segments = summary.segments_tested,
            faults = summary.faults_recorded,
            dropped = summary.faults_dropped,
            "diagnostic run complete"
        );
        summary
    }

    /// Faults found so far.
    #[must_use]
    pub fn queue(&self) -> &FaultQueue<A> {
        &self.queue
    }

    /// The record the sequencer mutates between checks.
    #[must_use]
    pub fn working_record(&self) -> &FaultRecord {
        &self.working
    }

    /// Session configuration.
    #[must_use]
    pub fn config(&self) -> &SequencerConfig {
        &self.config
    }

    /// End the session once its report has been consumed, releasing the
    /// queue. Returns the number of records released.
    pub fn reset(self) -> usize {
        let released = self.queue.destroy();
        info!(released, "diagnostic session reset");
        released
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ntd_fault_queue::FailingArena;
    use ntd_hal::{InjectedFault, Node, SimulatedJig};

    #[test]
    fn test_start_with_default_config() -> SessionResult<()> {
        let session = DiagnosticSession::new(SequencerConfig::default())?;
        assert!(session.queue().is_empty());
        assert!(!session.working_record().is_fault());
        Ok(())
    }

    #[test]
    fn test_start_rejects_bad_config() {
        let config = SequencerConfig {
            settle_ms: 0,
            ..SequencerConfig::default()
        };
        assert!(matches!(
            DiagnosticSession::new(config),
            Err(SessionError::Config(_))
        ));
    }

    #[test]
    fn test_start_fails_without_queue() {
        let result = DiagnosticSession::start(SequencerConfig::default(), FailingArena::on_create());
        assert!(matches!(&result, Err(e) if e.is_fatal()));
    }

    #[test]
    fn test_start_or_halt_passes_config_errors_through() {
        let mut jig = SimulatedJig::new();
        let config = SequencerConfig {
            settle_ms: 5000,
            ..SequencerConfig::default()
        };
        let result = DiagnosticSession::start_or_halt(config, HeapArena, &mut jig);
        assert!(matches!(result, Err(SessionError::Config(_))));
        assert!(jig.log().is_empty());
    }

    #[test]
    fn test_run_all_healthy_board() -> SessionResult<()> {
        let mut jig = SimulatedJig::new();
        let mut session = DiagnosticSession::new(SequencerConfig::default())?;
        let summary = session.run_all(&mut jig);
        assert_eq!(summary.segments_tested, 6);
        assert!(summary.passed());
        Ok(())
    }

    #[test]
    fn test_run_all_counts_faults() -> SessionResult<()> {
        let mut jig = SimulatedJig::with_faults([
            InjectedFault::NoHighVoltage { segment: 1 },
            InjectedFault::Open {
                segment: 3,
                node: Node::ZERO,
            },
        ]);
        let mut session = DiagnosticSession::new(SequencerConfig::default())?;
        let summary = session.run_all(&mut jig);
        assert_eq!(summary.faults_recorded, 2);
        assert_eq!(session.reset(), 2);
        Ok(())
    }
}
