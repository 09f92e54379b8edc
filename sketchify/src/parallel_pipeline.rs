// THEORY:
// The parallel pipeline runs the stroke pass with blocks spread over a pool of
// tokio worker tasks. Blocks are independent, so the only coordination is on the
// way in (a dispatcher deals tasks round-robin) and on the way out (every task
// answers on its own oneshot channel).
//
// The output arena never leaves `ParallelPipeline::run`. Workers only see a copy
// of their input block and send back a finished block; the caller pastes all of
// them once every reply is in. No locks guard the arena because nobody else can
// reach it.
//
// The contrast pass is a handful of full-grid scans and stays sequential.

use crate::core_modules::block::block::Block;
use crate::core_modules::grid_tiler::BlockOrigin;
use crate::core_modules::pixel_grid::PixelGrid;
use crate::core_modules::stroke::StrokeProcessor;
use crate::error::{Result, SketchError};
use crate::pipeline::{PipelineConfig, PipelineMode, SketchPipeline};
use futures::future::join_all;
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot};

pub type BlockResult = (BlockOrigin, Result<Block>);

pub struct BlockTask {
    pub origin: BlockOrigin,
    pub block: Block,
    pub result_sender: oneshot::Sender<BlockResult>,
}

/// Message type for block workers
enum BlockMessage {
    Process(BlockTask),
    Shutdown,
}

pub struct WorkerPool {
    task_sender: mpsc::UnboundedSender<BlockMessage>,
    workers: Vec<tokio::task::JoinHandle<()>>,
}

impl WorkerPool {
    /// Spawns `worker_count` workers sharing one stroke processor.
    /// Must be called from within a tokio runtime.
    pub fn new(worker_count: usize, processor: Arc<StrokeProcessor>) -> Self {
        let worker_count = worker_count.max(1);
        let (task_sender, mut task_receiver) = mpsc::unbounded_channel::<BlockMessage>();
        let mut workers = Vec::with_capacity(worker_count);

        // Create a single dispatcher that distributes tasks to workers
        let (worker_senders, worker_receivers): (Vec<_>, Vec<_>) = (0..worker_count)
            .map(|_| mpsc::unbounded_channel::<BlockMessage>())
            .unzip();

        tokio::spawn(async move {
            let mut worker_idx = 0;
            while let Some(message) = task_receiver.recv().await {
                match message {
                    BlockMessage::Process(task) => {
                        let _ = worker_senders[worker_idx].send(BlockMessage::Process(task));
                        worker_idx = (worker_idx + 1) % worker_senders.len();
                    }
                    BlockMessage::Shutdown => {
                        for sender in &worker_senders {
                            let _ = sender.send(BlockMessage::Shutdown);
                        }
                        break;
                    }
                }
            }
        });

        for mut worker_receiver in worker_receivers {
            let processor = Arc::clone(&processor);
            let worker = tokio::spawn(async move {
                while let Some(message) = worker_receiver.recv().await {
                    match message {
                        BlockMessage::Process(task) => {
                            let processed = processor.process(&task.block);
                            let _ = task.result_sender.send((task.origin, processed));
                        }
                        BlockMessage::Shutdown => break,
                    }
                }
            });
            workers.push(worker);
        }

        log::debug!("started {} block workers", worker_count);
        Self {
            task_sender,
            workers,
        }
    }

    pub fn worker_count(&self) -> usize {
        self.workers.len()
    }

    /// Queues one block; the receiver resolves once a worker has processed it.
    pub fn submit(&self, origin: BlockOrigin, block: Block) -> Result<oneshot::Receiver<BlockResult>> {
        let (result_sender, result_receiver) = oneshot::channel();
        let task = BlockTask {
            origin,
            block,
            result_sender,
        };
        self.task_sender
            .send(BlockMessage::Process(task))
            .map_err(|_| SketchError::WorkerPool("Failed to send task to worker pool"))?;
        Ok(result_receiver)
    }
}

impl Drop for WorkerPool {
    fn drop(&mut self) {
        // Best effort shutdown on drop
        let _ = self.task_sender.send(BlockMessage::Shutdown);
    }
}

pub struct ParallelPipeline {
    pipeline: SketchPipeline,
    worker_pool: WorkerPool,
}

impl ParallelPipeline {
    /// Validates `config` and starts the worker pool.
    pub fn new(config: PipelineConfig) -> Result<Self> {
        let workers = config.workers;
        let pipeline = SketchPipeline::new(config)?;
        let worker_pool = WorkerPool::new(workers, pipeline.stroke_processor());
        Ok(Self {
            pipeline,
            worker_pool,
        })
    }

    pub fn config(&self) -> &PipelineConfig {
        self.pipeline.config()
    }

    pub async fn run(&self, grid: &PixelGrid) -> Result<PixelGrid> {
        if self.config().mode == PipelineMode::Contrast {
            return self.pipeline.run(grid);
        }

        log::info!(
            "running parallel stroke pass on {}x{} grid with {} workers",
            grid.width(),
            grid.height(),
            self.worker_pool.worker_count()
        );
        let quantized = self.pipeline.quantize(grid);
        let tiler = self.pipeline.tiler();
        let mut arena = tiler.output_arena(&quantized);

        let mut pending = Vec::new();
        for origin in tiler.block_origins(quantized.width(), quantized.height()) {
            let block = tiler.extract(&quantized, origin);
            pending.push(self.worker_pool.submit(origin, block)?);
        }
        log::debug!("dispatched {} blocks", pending.len());

        for reply in join_all(pending).await {
            let (origin, processed) =
                reply.map_err(|_| SketchError::WorkerPool("Failed to receive result from worker"))?;
            tiler.write_back(&mut arena, origin, &processed?)?;
        }

        log::info!("pass finished with {}x{} output", arena.width(), arena.height());
        Ok(arena)
    }
}
