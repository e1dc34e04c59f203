/// 进度去重：只放行比上一次交付更大的百分比。
#[derive(Debug, Default)]
pub(crate) struct ProgressGate {
    last_delivered: Option<u8>,
}

impl ProgressGate {
    pub(crate) fn admit(&mut self, percent: u8) -> bool {
        let admitted = self.last_delivered.is_none_or(|last| percent > last);
        if admitted {
            self.last_delivered = Some(percent);
        }
        admitted
    }
}
