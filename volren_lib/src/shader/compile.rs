use std::{thread::JoinHandle, time::Duration};

use crossbeam::channel::{Receiver, Sender};
use log::{error, info};

use super::ProgramSpec;
use crate::{render::RenderMode, Result, VolumeError};

/// Backend able to build and link a program
///
/// Implemented by the real graphics layer, runs on the compiler thread.
pub trait ShaderBackend: Send + 'static {
    fn compile(&mut self, program: &ProgramSpec) -> std::result::Result<(), String>;
}

/// Backend accepting every program, for headless runs
#[derive(Debug, Default, Clone, Copy)]
pub struct ImmediateBackend;

impl ShaderBackend for ImmediateBackend {
    fn compile(&mut self, _program: &ProgramSpec) -> std::result::Result<(), String> {
        Ok(())
    }
}

/// Ask for `program` to be compiled, tagged with binding generation
#[derive(Debug, Clone, Copy)]
pub struct CompileRequest {
    pub program: &'static ProgramSpec,
    pub generation: u64,
}

/// Answer to a [`CompileRequest`]
#[derive(Debug, Clone, PartialEq)]
pub struct CompileCompletion {
    pub mode: RenderMode,
    pub generation: u64,
    pub result: std::result::Result<(), String>,
}

/// Messages to compiler thread
pub enum CompilerMessage {
    Compile(CompileRequest),
    /// Shut down, thread will get ready to be joined
    ShutDown,
}

/// Place where compile requests are submitted
pub trait CompileQueue {
    fn submit(&self, request: CompileRequest) -> Result<()>;
}

/// Compiles programs on a separate thread
///
/// Requests are handled in order. Completions queue up and are
/// collected by the driver with [`ShaderCompiler::try_completions`].
pub struct ShaderCompiler {
    handle: Option<JoinHandle<()>>,
    to_worker: Sender<CompilerMessage>,
    from_worker: Receiver<CompileCompletion>,
}

impl ShaderCompiler {
    /// Spawn compiler thread owning `backend`
    pub fn start<B: ShaderBackend>(mut backend: B) -> ShaderCompiler {
        let (to_worker, worker_in) = crossbeam::channel::unbounded::<CompilerMessage>();
        let (worker_out, from_worker) = crossbeam::channel::unbounded();

        let handle = std::thread::spawn(move || {
            // Master loop
            while let Ok(msg) = worker_in.recv() {
                let request = match msg {
                    CompilerMessage::Compile(request) => request,
                    CompilerMessage::ShutDown => break,
                };

                let result = backend.compile(request.program);
                match &result {
                    Ok(()) => info!(
                        "Compiled {} (generation {})",
                        request.program.id, request.generation
                    ),
                    Err(reason) => error!("Compiling {} failed: {reason}", request.program.id),
                }

                let completion = CompileCompletion {
                    mode: request.program.mode,
                    generation: request.generation,
                    result,
                };
                if worker_out.send(completion).is_err() {
                    break;
                }
            }
        });

        ShaderCompiler {
            handle: Some(handle),
            to_worker,
            from_worker,
        }
    }

    /// Completions received so far, non-blocking
    pub fn try_completions(&self) -> impl Iterator<Item = CompileCompletion> + '_ {
        self.from_worker.try_iter()
    }

    /// Block until next completion or timeout
    pub fn wait_completion(&self, timeout: Duration) -> Option<CompileCompletion> {
        self.from_worker.recv_timeout(timeout).ok()
    }

    /// Stop the thread and join it
    pub fn shutdown(&mut self) {
        if let Some(handle) = self.handle.take() {
            // Thread may already be gone, join regardless
            let _ = self.to_worker.send(CompilerMessage::ShutDown);
            if handle.join().is_err() {
                error!("Shader compiler thread panicked");
            }
        }
    }
}

impl CompileQueue for ShaderCompiler {
    fn submit(&self, request: CompileRequest) -> Result<()> {
        if self.handle.is_none() {
            return Err(compiler_gone(request));
        }
        self.to_worker
            .send(CompilerMessage::Compile(request))
            .map_err(|_| compiler_gone(request))
    }
}

impl Drop for ShaderCompiler {
    fn drop(&mut self) {
        self.shutdown();
    }
}

fn compiler_gone(request: CompileRequest) -> VolumeError {
    VolumeError::CompilationFailure {
        program: request.program.id.to_string(),
        reason: "compiler thread has shut down".into(),
    }
}

#[cfg(test)]
mod test {

    use super::*;
    use crate::{shader::MIP_PROGRAM, test_helpers::FailingBackend};

    const TIMEOUT: Duration = Duration::from_secs(5);

    #[test]
    fn completes_in_order() {
        let compiler = ShaderCompiler::start(ImmediateBackend);
        for generation in 1..=3 {
            compiler
                .submit(CompileRequest {
                    program: &MIP_PROGRAM,
                    generation,
                })
                .unwrap();
        }

        for generation in 1..=3 {
            let done = compiler.wait_completion(TIMEOUT).unwrap();
            assert_eq!(done.generation, generation);
            assert_eq!(done.mode, RenderMode::Mip);
            assert_eq!(done.result, Ok(()));
        }
    }

    #[test]
    fn failure_is_reported() {
        let compiler = ShaderCompiler::start(FailingBackend::new("link error"));
        compiler
            .submit(CompileRequest {
                program: &MIP_PROGRAM,
                generation: 1,
            })
            .unwrap();

        let done = compiler.wait_completion(TIMEOUT).unwrap();
        assert_eq!(done.result, Err("link error".to_string()));
    }

    #[test]
    fn submit_after_shutdown() {
        let mut compiler = ShaderCompiler::start(ImmediateBackend);
        compiler.shutdown();

        let res = compiler.submit(CompileRequest {
            program: &MIP_PROGRAM,
            generation: 1,
        });
        assert!(matches!(res, Err(VolumeError::CompilationFailure { .. })));
    }
}
