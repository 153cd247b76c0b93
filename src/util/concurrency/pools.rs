use std::{io, thread::{self, JoinHandle}, time::Instant};

use crossbeam_channel::{Sender, Receiver, unbounded};


// A result sent after the scheduler stopped listening is dropped.
struct SlotTask<T> {
    job: Box<dyn FnOnce() -> T + Send>,
    results: Sender<T>,
}

impl<T> SlotTask<T> {
    fn run(self) {
        let _ = self.results.send((self.job)());
    }
}


/// Runs at most `capacity` tasks at once, one thread per task. Results come
/// back over a channel; receiving a result frees that task's slot.
pub struct TaskSlots<T: Send + 'static> {
    capacity: usize,
    in_flight: usize,
    result_writer: Sender<T>,
    result_reader: Receiver<T>,
    handles: Vec<JoinHandle<()>>,
}

impl<T: Send + 'static> TaskSlots<T> {
    pub fn new(capacity: usize) -> Self {
        let (tx, rx) = unbounded();
        return Self {
            capacity: capacity.max(1),
            in_flight: 0,
            result_writer: tx,
            result_reader: rx,
            handles: Vec::new(),
        }
    }

    pub fn has_free_slot(&self) -> bool {
        return self.in_flight < self.capacity;
    }

    pub fn in_flight(&self) -> usize {
        return self.in_flight;
    }

    pub fn spawn(&mut self, name: String, task: Box<dyn FnOnce() -> T + Send>) -> Result<(), io::Error> {
        let job = SlotTask { job: task, results: self.result_writer.clone() };
        let handle = thread::Builder::new().name(name).spawn(move || job.run())?;
        self.handles.push(handle);
        self.in_flight += 1;
        return Ok(());
    }

    /// Blocks until a task reports. `None` when nothing is in flight.
    pub fn recv(&mut self) -> Option<T> {
        if self.in_flight == 0 {
            return None;
        }
        return match self.result_reader.recv() {
            Ok(result) => {
                self.in_flight -= 1;
                self.reap_finished();
                Some(result)
            },
            Err(_) => None,
        }
    }

    /// Waits until a task reports or `deadline` passes.
    pub fn recv_deadline(&mut self, deadline: Instant) -> Option<T> {
        if self.in_flight == 0 {
            return None;
        }
        return match self.result_reader.recv_deadline(deadline) {
            Ok(result) => {
                self.in_flight -= 1;
                self.reap_finished();
                Some(result)
            },
            Err(_) => None,
        }
    }

    fn reap_finished(&mut self) {
        let (finished, running): (Vec<_>, Vec<_>) = self.handles.drain(..).partition(|h| h.is_finished());
        self.handles = running;
        for handle in finished {
            let _ = handle.join();
        }
    }

    /// Stops tracking the remaining tasks. They keep running on their own
    /// threads and their results are discarded.
    pub fn detach(mut self) -> usize {
        self.reap_finished();
        return self.handles.len();
    }
}
