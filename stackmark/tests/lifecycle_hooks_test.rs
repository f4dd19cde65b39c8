// The generated hooks, bound to an allocator that never reports a break.
// Painting is skipped without touching memory, so this is safe on a host.
use stackmark::{BreakProbe, Error, MemoryLayout, Overrun, Verdict};

struct NoAllocator;

impl BreakProbe for NoAllocator {
    fn current_break(&self) -> Result<usize, Error> {
        Err(Error::ProbeFailed)
    }
}

fn overrun_trap() -> ! {
    panic!("overrun trap fired")
}

stackmark::lifecycle_hooks! {
    layout: MemoryLayout::new(0x2000_0100, 0x2000_1000),
    probe: NoAllocator,
    overrun: overrun_trap,
    init: manual,
    exit: manual,
}

#[test_log::test]
fn test_init_without_break_returns() {
    watermark_init();
}

#[test]
fn test_measure_reports_probe_failure() {
    assert_eq!(
        watermark_measure(),
        Verdict::Overrun(Overrun::Fault(Error::ProbeFailed))
    );
}

#[test]
#[should_panic(expected = "overrun trap fired")]
fn test_exit_without_break_runs_handler() {
    watermark_exit();
}
