//! Segment test sequencer.
//!
//! One call to [`SegmentTester::run_segment_test`] exercises every node of a
//! segment in a fixed order and appends a record for every anomaly:
//!
//! ```text
//! select segment ─► HV rail ─► blank ─► digits 1..=9 ─► digit 0 ─► decimal point
//!                                                                  (skipped on segment 0)
//! ```
//!
//! Every actuation is followed by a settle delay before sampling. The checks
//! within a step are independent: one step can append up to three records.

use ntd_fault_queue::{AppendOutcome, FaultKind, FaultQueue, FaultRecord, RecordArena};
use ntd_hal::{Digit, DisplayFrame, HalResult, JigHardware, Level, Line, Node};
use tracing::{debug, trace};

use crate::SequencerConfig;
use crate::encoder::read_active_digit;

/// Writes findings through the session's working record.
struct FaultSink<'r, A: RecordArena> {
    working: &'r mut FaultRecord,
    queue: &'r mut FaultQueue<A>,
}

impl<A: RecordArena> FaultSink<'_, A> {
    fn commanding(&mut self, node: Node) {
        self.working.commanded = node;
    }

    fn record(&mut self, kind: FaultKind, observed: Node) {
        self.working.kind = kind;
        self.working.observed = observed;
        debug!(
            segment = self.working.segment,
            kind = %kind,
            commanded = %self.working.commanded,
            observed = %observed,
            "fault detected"
        );
        match self.queue.append(&*self.working) {
            AppendOutcome::Stored => {}
            outcome => trace!(?outcome, "fault not stored"),
        }
    }

    fn open(&mut self, node: Node) {
        self.record(FaultKind::Open, node);
    }

    fn short(&mut self, observed: Node) {
        self.record(FaultKind::Short, observed);
    }
}

/// Display frames lighting one segment, built before any actuation.
struct SegmentFrames {
    zero: DisplayFrame,
    sweep: Vec<(Digit, DisplayFrame)>,
}

impl SegmentFrames {
    fn for_segment(segment: u8) -> HalResult<Self> {
        let zero = DisplayFrame::single(segment, Digit::ZERO)?;
        let sweep = Digit::sweep()
            .map(|digit| DisplayFrame::single(segment, digit).map(|frame| (digit, frame)))
            .collect::<HalResult<Vec<_>>>()?;
        Ok(Self { zero, sweep })
    }
}

/// Drives one segment test against the jig hardware.
#[derive(Debug)]
pub struct SegmentTester<'a, H: ?Sized> {
    hw: &'a mut H,
    config: &'a SequencerConfig,
}

impl<'a, H: JigHardware + ?Sized> SegmentTester<'a, H> {
    /// Create a tester over `hw` using `config`'s settle times.
    pub fn new(hw: &'a mut H, config: &'a SequencerConfig) -> Self {
        Self { hw, config }
    }

    /// Test every node of `segment`, appending findings to `queue`.
    ///
    /// `working` is overwritten field by field as the test proceeds; the
    /// queue stores copies. A `segment` off the panel is ignored without
    /// touching the hardware.
    pub fn run_segment_test<A: RecordArena>(
        &mut self,
        segment: u8,
        working: &mut FaultRecord,
        queue: &mut FaultQueue<A>,
    ) {
        let frames = match SegmentFrames::for_segment(segment) {
            Ok(frames) => frames,
            Err(err) => {
                debug!(segment, error = %err, "segment index out of range, test skipped");
                return;
            }
        };

        working.segment = segment;
        let mut sink = FaultSink { working, queue };

        self.select_segment(segment);
        self.hw.delay_ms(self.config.segment_select_settle_ms);

        self.check_high_voltage(&mut sink);
        self.check_quiescent(&mut sink);
        self.sweep_digits(&frames.sweep, &mut sink);
        self.check_zero(frames.zero, &mut sink);

        // Segment 0 has no decimal point ahead of it.
        if let Some(previous) = segment.checked_sub(1) {
            self.check_decimal_point(previous, &mut sink);
        }
    }

    /// Route `segment` to the sense lines. Outputs are held off while the
    /// select code changes.
    fn select_segment(&mut self, segment: u8) {
        self.hw.write_line(Line::SegmentEnable, Level::Low);
        for bit in 0..Line::SEGMENT_SELECT_BITS {
            let level = Level::from(segment & (1u8 << bit) != 0);
            self.hw.write_line(Line::SegmentSelect(bit), level);
        }
        self.hw.write_line(Line::SegmentEnable, Level::High);
    }

    fn show(&mut self, frame: DisplayFrame) {
        self.hw.display_digits(frame);
        self.hw.delay_ms(self.config.settle_ms);
    }

    fn zero_lit(&mut self) -> bool {
        self.hw.read_line(Line::SenseZero).is_low()
    }

    fn decimal_point_lit(&mut self) -> bool {
        self.hw.read_line(Line::SenseDecimalPoint).is_low()
    }

    fn high_voltage_present(&mut self) -> bool {
        self.hw.read_line(Line::SenseHighVoltage).is_high()
    }

    fn check_high_voltage<A: RecordArena>(&mut self, sink: &mut FaultSink<'_, A>) {
        sink.commanding(Node::HighVoltage);
        if !self.high_voltage_present() {
            sink.open(Node::HighVoltage);
        }
    }

    fn check_quiescent<A: RecordArena>(&mut self, sink: &mut FaultSink<'_, A>) {
        sink.commanding(Node::Blank);
        self.show(DisplayFrame::blank());

        if let Some(active) = read_active_digit(&mut *self.hw) {
            sink.short(active);
        }
        if self.zero_lit() {
            sink.short(Node::ZERO);
        }
        if self.decimal_point_lit() {
            sink.short(Node::DecimalPoint);
        }
    }

    fn sweep_digits<A: RecordArena>(
        &mut self,
        sweep: &[(Digit, DisplayFrame)],
        sink: &mut FaultSink<'_, A>,
    ) {
        for &(digit, frame) in sweep {
            let expected = Node::Digit(digit);
            sink.commanding(expected);
            self.show(frame);

            match read_active_digit(&mut *self.hw) {
                Some(active) if active == expected => {}
                None => sink.open(expected),
                Some(other) => sink.short(other),
            }
            if self.zero_lit() {
                sink.short(Node::ZERO);
            }
            if self.decimal_point_lit() {
                sink.short(Node::DecimalPoint);
            }
        }
    }

    /// Zero is invisible to the encoder; its own sense line decides open.
    fn check_zero<A: RecordArena>(&mut self, frame: DisplayFrame, sink: &mut FaultSink<'_, A>) {
        sink.commanding(Node::ZERO);
        self.show(frame);

        if !self.zero_lit() {
            sink.open(Node::ZERO);
        }
        if self.decimal_point_lit() {
            sink.short(Node::DecimalPoint);
        }
        if let Some(active) = read_active_digit(&mut *self.hw) {
            sink.short(active);
        }
    }

    /// The decimal point driven after `previous` is the one sensed on the
    /// segment under test.
    fn check_decimal_point<A: RecordArena>(&mut self, previous: u8, sink: &mut FaultSink<'_, A>) {
        sink.commanding(Node::DecimalPoint);
        self.hw.set_decimal_point(previous, true);
        self.show(DisplayFrame::blank());

        if !self.decimal_point_lit() {
            sink.open(Node::DecimalPoint);
        }
        if self.zero_lit() {
            sink.short(Node::ZERO);
        }
        if let Some(active) = read_active_digit(&mut *self.hw) {
            sink.short(active);
        }

        self.hw.set_decimal_point(previous, false);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ntd_fault_queue::QueueResult;
    use ntd_hal::{Actuation, SimulatedJig};
    use tracing_test::traced_test;

    fn run(jig: &mut SimulatedJig, segment: u8) -> QueueResult<Vec<FaultRecord>> {
        let config = SequencerConfig::default();
        let mut queue = FaultQueue::create()?;
        let mut working = FaultRecord::working(0);
        SegmentTester::new(jig, &config).run_segment_test(segment, &mut working, &mut queue);
        Ok(queue.iter().copied().collect())
    }

    #[test]
    fn test_healthy_segment_records_nothing() -> QueueResult<()> {
        let mut jig = SimulatedJig::new();
        for segment in 0..6 {
            assert!(run(&mut jig, segment)?.is_empty(), "segment {segment}");
        }
        Ok(())
    }

    #[test]
    #[traced_test]
    fn test_out_of_range_segment_is_noop() -> QueueResult<()> {
        let mut jig = SimulatedJig::new();
        assert!(run(&mut jig, 6)?.is_empty());
        assert!(run(&mut jig, 255)?.is_empty());
        assert!(jig.log().is_empty());
        assert!(logs_contain("segment index out of range, test skipped"));
        Ok(())
    }

    #[test]
    fn test_display_frames_light_only_tested_segment() -> Result<(), Box<dyn std::error::Error>> {
        let mut jig = SimulatedJig::new();
        run(&mut jig, 1)?;
        let shown: Vec<DisplayFrame> = jig
            .log()
            .iter()
            .filter_map(|a| match a {
                Actuation::Display(frame) => Some(*frame),
                _ => None,
            })
            .collect();

        let mut expected = vec![DisplayFrame::blank()];
        for digit in Digit::sweep() {
            expected.push(DisplayFrame::single(1, digit)?);
        }
        expected.push(DisplayFrame::single(1, Digit::ZERO)?);
        // decimal point check
        expected.push(DisplayFrame::blank());
        assert_eq!(shown, expected);
        Ok(())
    }

    #[test]
    fn test_segment_select_disables_outputs_first() -> QueueResult<()> {
        let mut jig = SimulatedJig::new();
        run(&mut jig, 5)?;
        assert_eq!(
            jig.log().get(..5),
            Some(
                &[
                    Actuation::Write(Line::SegmentEnable, Level::Low),
                    Actuation::Write(Line::SegmentSelect(0), Level::High),
                    Actuation::Write(Line::SegmentSelect(1), Level::Low),
                    Actuation::Write(Line::SegmentSelect(2), Level::High),
                    Actuation::Write(Line::SegmentEnable, Level::High),
                ][..]
            )
        );
        Ok(())
    }

    #[test]
    fn test_every_display_command_settles() -> QueueResult<()> {
        let mut jig = SimulatedJig::new();
        run(&mut jig, 3)?;
        let log = jig.log();
        for (i, entry) in log.iter().enumerate() {
            if matches!(entry, Actuation::Display(_)) {
                assert_eq!(log.get(i + 1), Some(&Actuation::Delay(10)), "entry {i}");
            }
        }
        // select + blank + 9 digits + zero + decimal point
        let delays = log.iter().filter(|a| matches!(a, Actuation::Delay(_))).count();
        assert_eq!(delays, 13);
        Ok(())
    }

    #[test]
    fn test_decimal_point_switched_off_after_check() -> QueueResult<()> {
        let mut jig = SimulatedJig::new();
        run(&mut jig, 2)?;
        let dp: Vec<&Actuation> = jig
            .log()
            .iter()
            .filter(|a| matches!(a, Actuation::DecimalPoint { .. }))
            .collect();
        assert_eq!(
            dp,
            vec![
                &Actuation::DecimalPoint {
                    segment: 1,
                    on: true
                },
                &Actuation::DecimalPoint {
                    segment: 1,
                    on: false
                },
            ]
        );
        Ok(())
    }

    #[test]
    fn test_working_record_tracks_last_check() -> QueueResult<()> {
        let config = SequencerConfig::default();
        let mut jig = SimulatedJig::new();
        let mut queue = FaultQueue::create()?;
        let mut working = FaultRecord::working(0);
        SegmentTester::new(&mut jig, &config).run_segment_test(4, &mut working, &mut queue);
        assert_eq!(working.segment, 4);
        assert_eq!(working.commanded, Node::DecimalPoint);
        assert_eq!(working.kind, FaultKind::None);
        Ok(())
    }
}
