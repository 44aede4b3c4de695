//! Runs a move strategy on a worker thread.
//!
//! The worker owns the engine and an immutable snapshot of the position. The
//! host polls for the answer or raises the shared stop flag; nothing here
//! touches the live game, so the host decides when to apply the result.

use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread::{self, JoinHandle};

use crate::chess_errors::ChessErrors;
use crate::engines::engine_trait::{Engine, EngineOutput, GoParams};
use crate::game_state::game_state::GameState;

type WorkerResult<E> = (E, Result<EngineOutput, ChessErrors>);

pub struct EngineThread<E: Engine + 'static> {
    params: GoParams,
    receiver: Receiver<WorkerResult<E>>,
    handle: Option<JoinHandle<()>>,
    finished: Option<WorkerResult<E>>,
}

impl<E: Engine + 'static> EngineThread<E> {
    pub fn spawn(mut engine: E, snapshot: GameState) -> Self {
        let params = GoParams::default();
        let worker_params = params.clone();
        let (sender, receiver) = mpsc::channel::<WorkerResult<E>>();

        let handle = thread::spawn(move || {
            let result = engine.choose_move(&snapshot, &worker_params);
            // The host may have dropped its end; nothing to report then.
            let _ = sender.send((engine, result));
        });

        Self {
            params,
            receiver,
            handle: Some(handle),
            finished: None,
        }
    }

    /// Ask the engine to answer as soon as it can.
    pub fn cancel(&self) {
        self.params.request_stop();
    }

    /// Non-blocking check for completion.
    pub fn poll(&mut self) -> bool {
        if self.finished.is_some() {
            return true;
        }
        match self.receiver.try_recv() {
            Ok(result) => {
                self.finished = Some(result);
                true
            }
            Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => false,
        }
    }

    /// Block until the worker answers and hand back the engine with its output.
    pub fn finish(mut self) -> Result<(E, EngineOutput), ChessErrors> {
        let received = match self.finished.take() {
            Some(result) => Ok(result),
            None => self.receiver.recv(),
        };
        if let Some(handle) = self.handle.take() {
            handle
                .join()
                .map_err(|_| ChessErrors::EngineFailure("engine thread panicked".to_owned()))?;
        }

        let (engine, output) = received
            .map_err(|_| ChessErrors::EngineFailure("engine thread ended without a result".to_owned()))?;
        Ok((engine, output?))
    }
}
