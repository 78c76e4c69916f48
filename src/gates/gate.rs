//! A single entry gate
//!
//! Each gate owns a FIFO queue of serials behind its own lock.

use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::types::{GateId, SerialNumber};

/// Entry gate with an exclusively locked FIFO queue
#[derive(Debug)]
pub struct Gate {
    id: GateId,
    queue: Mutex<VecDeque<SerialNumber>>,
}

impl Gate {
    /// Create an empty gate
    pub fn new(id: GateId) -> Self {
        Self { id, queue: Mutex::new(VecDeque::new()) }
    }

    /// Identifier of this gate
    pub fn id(&self) -> GateId {
        self.id
    }

    /// Current queue length
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Whether the queue is empty
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Append a serial to the back of the queue
    pub fn enqueue(&self, serial: SerialNumber) {
        self.lock().push_back(serial);
    }

    /// Copy of the queue, front first
    pub fn contents(&self) -> Vec<SerialNumber> {
        self.lock().iter().copied().collect()
    }

    /// Run `f` with the queue locked
    ///
    /// Callers must not acquire another gate's lock inside `f`.
    pub fn with_queue<R>(&self, f: impl FnOnce(&mut VecDeque<SerialNumber>) -> R) -> R {
        let mut queue = self.lock();
        f(&mut queue)
    }

    fn lock(&self) -> MutexGuard<'_, VecDeque<SerialNumber>> {
        self.queue.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fifo_order() {
        let gate = Gate::new(GateId(0));
        gate.enqueue(SerialNumber(3));
        gate.enqueue(SerialNumber(1));
        gate.enqueue(SerialNumber(7));

        assert_eq!(gate.len(), 3);
        assert_eq!(gate.with_queue(|queue| queue.pop_front()), Some(SerialNumber(3)));
        assert_eq!(gate.contents(), vec![SerialNumber(1), SerialNumber(7)]);
    }

    #[test]
    fn test_empty_gate() {
        let gate = Gate::new(GateId(1));
        assert!(gate.is_empty());
        assert_eq!(gate.id(), GateId(1));
        assert_eq!(gate.with_queue(|queue| queue.pop_front()), None);
    }
}
