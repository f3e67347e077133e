use std::sync::{
    Arc,
    mpsc::{Receiver, Sender},
};
use threadpool::ThreadPool;

use crate::api::Backend;
use crate::controller::{Controller, UiEvent};
use crate::geocoder::Geocoder;
use crate::task::{Completion, Task};


pub enum Message {
    Ui(UiEvent),
    Done(Completion),
    Quit,
}


// Runs tasks off the UI thread and posts their completions back to it.
pub struct Dispatcher {
    pool: ThreadPool,
    backend: Arc<dyn Backend>,
    geocoder: Arc<dyn Geocoder>,
    sender: Sender<Message>,
}

impl Dispatcher {
    pub fn new(n_workers: usize, backend: Arc<dyn Backend>, geocoder: Arc<dyn Geocoder>,
        sender: Sender<Message>) -> Self {

        Dispatcher {
            pool: ThreadPool::new(n_workers),
            backend,
            geocoder,
            sender,
        }
    }

    pub fn dispatch(&self, task: Task) {
        let backend = self.backend.clone();
        let geocoder = self.geocoder.clone();
        let sender = self.sender.clone();

        self.pool.execute(move || {
            let completion = task.run(&*backend, &*geocoder);

            if sender.send(Message::Done(completion)).is_err() {
                debug!("UI loop is gone");
            }
        });
    }

    pub fn join(&self) {
        self.pool.join();
    }
}


pub fn run_event_loop<F>(controller: &mut Controller, dispatcher: &Dispatcher,
    receiver: &Receiver<Message>, initial: Vec<Task>, mut on_update: F) where
    F: FnMut(&mut Controller) {

    for task in initial {
        dispatcher.dispatch(task);
    }
    on_update(controller);

    for message in receiver.iter() {
        let tasks = match message {
            Message::Ui(event) => controller.handle(event),
            Message::Done(completion) => controller.complete(completion),
            Message::Quit => break,
        };

        for task in tasks {
            dispatcher.dispatch(task);
        }
        on_update(controller);
    }

    // Let running requests finish, but start nothing new.
    dispatcher.join();
    while let Ok(message) = receiver.try_recv() {
        if let Message::Done(completion) = message {
            let dropped = controller.complete(completion).len();
            if dropped > 0 {
                debug!("Skip {} follow-up tasks on exit", dropped);
            }
        }
    }
    on_update(controller);
}
