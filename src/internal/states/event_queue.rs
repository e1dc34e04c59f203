//! # EventQueue：下载事件队列
//!
//! 基于 `tokio::sync::mpsc::unbounded_channel` 的单向 FIFO 队列：
//! 下载任务（生产者）推送进度与结束事件，调用方所在的任务（消费者）按顺序取出并回调监听器。
//!
//! - 生产端可 Clone，发送不阻塞
//! - 消费端只有一个，独占接收
//! - 仅库内部使用

use tokio::sync::mpsc;

/// 事件队列生产者端
#[derive(Debug)]
pub(crate) struct EventQueue<T: Send + 'static> {
    sender: mpsc::UnboundedSender<T>,
}

impl<T: Send + 'static> Clone for EventQueue<T> {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
        }
    }
}

/// 事件队列消费者端，不可 Clone。
#[derive(Debug)]
pub(crate) struct EventConsumer<T: Send + 'static> {
    receiver: mpsc::UnboundedReceiver<T>,
}

impl<T: Send + 'static> EventQueue<T> {
    /// 返回 (生产者, 消费者)。
    pub(crate) fn new() -> (Self, EventConsumer<T>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (Self { sender }, EventConsumer { receiver })
    }

    /// 推送一条事件；消费者已关闭时原样返回 `Err(T)`。
    pub(crate) fn send(&self, value: T) -> Result<(), T> {
        self.sender.send(value).map_err(|e| e.0)
    }
}

impl<T: Send + 'static> EventConsumer<T> {
    /// 等待下一条事件；所有生产者都已释放且队列为空时返回 `None`。
    pub(crate) async fn recv(&mut self) -> Option<T> {
        self.receiver.recv().await
    }
}
