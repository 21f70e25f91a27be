// 現在時刻の取得元
// 問題IDや回答履歴のタイムスタンプに使用. テストでは固定値を返す実装に差し替える
pub trait Clock {
    // unix epochからの経過ミリ秒
    fn now_millis(&self) -> u64;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> u64 {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0)
    }
}

// 呼び出しごとに一定時間進む時計
#[derive(Debug)]
pub struct StepClock {
    now: std::cell::Cell<u64>,
    step: u64,
}

impl StepClock {
    pub fn new(start: u64, step: u64) -> Self {
        Self {
            now: std::cell::Cell::new(start),
            step,
        }
    }
}

impl Clock for StepClock {
    fn now_millis(&self) -> u64 {
        let t = self.now.get();
        self.now.set(t + self.step);
        t
    }
}

#[test]
fn test_step_clock() {
    let c = StepClock::new(1000, 500);
    assert_eq!(c.now_millis(), 1000);
    assert_eq!(c.now_millis(), 1500);
    assert!(SystemClock.now_millis() > 0);
}
