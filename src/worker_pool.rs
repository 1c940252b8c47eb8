use crate::cli::PrintableMessage;
use crate::graphql::CompileConfig;
use crate::work::Work;
use crossbeam_channel as channel;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;

#[derive(Debug)]
enum Message {
    Work(Work),
    Quit,
}

struct Worker {
    threads: usize,
    num_pending: Arc<AtomicUsize>,
    config: Arc<CompileConfig>,
    tx: channel::Sender<Message>,
    rx: channel::Receiver<Message>,
    messages: Vec<PrintableMessage>,
}

/// Marks one unit of work finished when dropped, including while unwinding from a panic.
struct PendingWork<'a> {
    threads: usize,
    num_pending: &'a AtomicUsize,
    tx: &'a channel::Sender<Message>,
}

impl Drop for PendingWork<'_> {
    /// Once nothing is pending no new work can appear, so everyone may stop.
    fn drop(&mut self) {
        if self.num_pending.fetch_sub(1, Ordering::SeqCst) == 1 {
            for _ in 0..self.threads {
                let _ = self.tx.send(Message::Quit);
            }
        }
    }
}

impl Worker {
    fn run(mut self) -> Vec<PrintableMessage> {
        while let Ok(Message::Work(work)) = self.rx.recv() {
            let _pending = PendingWork {
                threads: self.threads,
                num_pending: &self.num_pending,
                tx: &self.tx,
            };
            let more_work = work.run(&self.config, &mut self.messages);
            for new_work in more_work {
                self.num_pending.fetch_add(1, Ordering::SeqCst);
                // This worker holds a receiver, so the channel cannot be disconnected.
                let _ = self.tx.send(Message::Work(new_work));
            }
        }
        self.messages
    }
}

pub struct WorkerPool {
    num_workers: usize,
    config: Arc<CompileConfig>,
}

impl WorkerPool {
    pub fn new(num_workers: usize, config: CompileConfig) -> WorkerPool {
        WorkerPool {
            num_workers: num_workers.max(1),
            config: Arc::new(config),
        }
    }

    /// Work through `roots` and everything they discover, returning every message produced.
    pub fn work(&self, roots: Vec<Work>) -> Vec<PrintableMessage> {
        if roots.is_empty() {
            return Vec::new();
        }
        let threads = self.num_workers;
        let (tx, rx) = channel::unbounded();
        let num_pending = Arc::new(AtomicUsize::new(roots.len()));
        for root in roots {
            let _ = tx.send(Message::Work(root));
        }
        let mut handles = Vec::with_capacity(threads);
        for _ in 0..threads {
            let worker = Worker {
                threads,
                num_pending: num_pending.clone(),
                config: self.config.clone(),
                tx: tx.clone(),
                rx: rx.clone(),
                messages: Vec::new(),
            };
            handles.push(thread::spawn(|| worker.run()));
        }
        drop(tx);
        drop(rx);
        let mut messages = Vec::new();
        for handle in handles {
            match handle.join() {
                Ok(worker_messages) => messages.extend(worker_messages),
                Err(_) => messages.push(PrintableMessage::new_simple_program_error(
                    "a worker thread panicked",
                )),
            }
        }
        // Workers finish in any order; keep output stable per file.
        messages.sort_by(|a, b| a.file_path().cmp(&b.file_path()));
        messages
    }
}
