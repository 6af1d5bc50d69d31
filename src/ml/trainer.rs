// ============================================================
// Layer 5 — Training Loop
// ============================================================
// Mini-batch training of the linear classifier with Adam.
//
//   - Training runs on Autodiff<NdArray> so gradients are tracked
//   - model.valid() drops autodiff (and dropout) for evaluation
//   - Samples are reshuffled every epoch with a seeded RNG
//
// Each epoch logs train loss, validation loss and validation
// accuracy to the MetricsLogger. The returned model is the one
// from the epoch with the lowest validation loss; with no
// validation samples every loss is NaN and the last epoch's
// model is returned.

use burn::{
    backend::{ndarray::NdArrayDevice, Autodiff, NdArray},
    module::AutodiffModule,
    optim::{AdamConfig, GradientsParams, Optimizer},
    prelude::*,
};
use rand::{rngs::StdRng, SeedableRng};

use crate::application::train_use_case::TrainConfig;
use crate::data::{batcher::ClassifierBatcher, dataset::FaqDataset};
use crate::domain::error::{BotError, Result};
use crate::infra::metrics::{EpochMetrics, MetricsLogger};
use crate::ml::model::{FaqClassifier, FaqClassifierConfig};

type TrainBackend = Autodiff<NdArray>;
type EvalBackend  = NdArray;

/// Result of a finished run: the evaluation-ready model and its history.
pub struct TrainedModel {
    pub model:      FaqClassifier<EvalBackend>,
    /// Epoch the model was taken from, or None if it is simply the last one
    pub best_epoch: Option<usize>,
    pub history:    Vec<EpochMetrics>,
}

pub fn run_training(
    cfg:          &TrainConfig,
    model_cfg:    &FaqClassifierConfig,
    mut train:    FaqDataset,
    val:          FaqDataset,
    metrics:      &MetricsLogger,
) -> Result<TrainedModel> {
    if train.is_empty() {
        return Err(BotError::Training("no training samples".into()));
    }

    let device = NdArrayDevice::default();
    let mut model: FaqClassifier<TrainBackend> = model_cfg.init(&device);
    let mut optim = AdamConfig::new().with_epsilon(1e-8).init();
    let mut rng   = StdRng::seed_from_u64(cfg.seed);

    let train_batcher = ClassifierBatcher::<TrainBackend>::new(device.clone());
    let val_batcher   = ClassifierBatcher::<EvalBackend>::new(device.clone());

    tracing::info!(
        "Training on {} samples ({} validation), {} features → {} labels",
        train.len(),
        val.len(),
        model_cfg.num_features,
        model_cfg.num_labels,
    );

    let mut history       = Vec::with_capacity(cfg.epochs);
    let mut best_val_loss = f64::INFINITY;
    let mut best: Option<(usize, FaqClassifier<EvalBackend>)> = None;

    for epoch in 1..=cfg.epochs {
        // ── Training phase ────────────────────────────────────────────────────
        train.shuffle(&mut rng);

        let mut loss_sum = 0.0f64;
        let mut batches  = 0usize;
        for items in train.batches(cfg.batch_size) {
            let batch     = train_batcher.batch(items);
            let (loss, _) = model.forward_loss(batch.features, batch.targets);

            loss_sum += loss.clone().into_scalar().elem::<f64>();
            batches  += 1;

            let grads = loss.backward();
            let grads = GradientsParams::from_grads(grads, &model);
            model = optim.step(cfg.lr, model, grads);
        }
        let train_loss = loss_sum / batches.max(1) as f64;

        // ── Validation phase ──────────────────────────────────────────────────
        let eval_model = model.valid();
        let (val_loss, val_accuracy) = evaluate(&eval_model, &val, &val_batcher, cfg.batch_size);

        let m = EpochMetrics::new(epoch, train_loss, val_loss, val_accuracy);
        metrics.log(&m)?;
        tracing::debug!(
            "Epoch {:>3}/{} | train_loss={:.4} | val_loss={:.4} | val_acc={:.1}%",
            epoch, cfg.epochs, train_loss, val_loss, val_accuracy * 100.0,
        );

        // NaN never compares as an improvement
        if m.is_improvement(best_val_loss) {
            best_val_loss = val_loss;
            best          = Some((epoch, eval_model));
        }
        history.push(m);
    }

    if let Some(last) = history.last() {
        tracing::info!(
            "Training complete: train_loss={:.4}, val_acc={:.1}%",
            last.train_loss,
            last.val_accuracy * 100.0,
        );
    }

    let (best_epoch, model) = match best {
        Some((epoch, best_model)) => {
            tracing::info!("Keeping model from epoch {epoch} (val_loss={best_val_loss:.4})");
            (Some(epoch), best_model)
        }
        None => (None, model.valid()),
    };

    Ok(TrainedModel { model, best_epoch, history })
}

/// Mean loss and accuracy over `dataset`; both NaN if it is empty.
pub fn evaluate(
    model:      &FaqClassifier<EvalBackend>,
    dataset:    &FaqDataset,
    batcher:    &ClassifierBatcher<EvalBackend>,
    batch_size: usize,
) -> (f64, f64) {
    let mut loss_sum = 0.0f64;
    let mut batches  = 0usize;
    let mut correct  = 0usize;
    let mut total    = 0usize;

    for items in dataset.batches(batch_size) {
        let batch        = batcher.batch(items);
        let (loss, logits) = model.forward_loss(batch.features, batch.targets.clone());

        loss_sum += loss.into_scalar().elem::<f64>();
        batches  += 1;

        // argmax(1) returns [batch, 1]; flatten before comparing with [batch]
        let predicted = logits.argmax(1).flatten::<1>(0, 1);
        let hits: i64 = predicted
            .equal(batch.targets)
            .int()
            .sum()
            .into_scalar()
            .elem::<i64>();

        correct += hits as usize;
        total   += items.len();
    }

    if total == 0 {
        return (f64::NAN, f64::NAN);
    }
    (loss_sum / batches as f64, correct as f64 / total as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::dataset::LabeledSample;

    fn separable() -> Vec<LabeledSample> {
        (0..8)
            .map(|i| {
                let label = i % 2;
                let mut x = vec![0.0f32; 4];
                x[label * 2]     = 0.8;
                x[label * 2 + 1] = 0.6;
                LabeledSample::new(x, label)
            })
            .collect()
    }

    fn config() -> TrainConfig {
        TrainConfig { epochs: 40, batch_size: 4, lr: 0.1, ..TrainConfig::default() }
    }

    #[test]
    fn test_learns_separable_data() {
        let dir     = tempfile::tempdir().unwrap();
        let metrics = MetricsLogger::new(dir.path()).unwrap();
        let model_cfg = FaqClassifierConfig::new(4, 2).with_dropout(0.0);

        let trained = run_training(
            &config(),
            &model_cfg,
            FaqDataset::new(separable()),
            FaqDataset::new(separable()),
            &metrics,
        )
        .unwrap();

        assert_eq!(trained.history.len(), 40);
        let last = trained.history.last().unwrap();
        assert_eq!(last.val_accuracy, 1.0);
        assert!(last.train_loss < trained.history[0].train_loss);
    }

    #[test]
    fn test_keeps_lowest_validation_loss_epoch() {
        let dir     = tempfile::tempdir().unwrap();
        let metrics = MetricsLogger::new(dir.path()).unwrap();
        let trained = run_training(
            &TrainConfig { epochs: 10, ..config() },
            &FaqClassifierConfig::new(4, 2).with_dropout(0.0),
            FaqDataset::new(separable()),
            FaqDataset::new(separable()),
            &metrics,
        )
        .unwrap();

        let best = trained
            .history
            .iter()
            .min_by(|a, b| a.val_loss.total_cmp(&b.val_loss))
            .unwrap();
        assert_eq!(trained.best_epoch, Some(best.epoch));

        // the returned weights reproduce that epoch's validation loss
        let batcher = ClassifierBatcher::<EvalBackend>::new(NdArrayDevice::default());
        let (loss, _) = evaluate(&trained.model, &FaqDataset::new(separable()), &batcher, 4);
        assert!((loss - best.val_loss).abs() < 1e-4, "{loss} vs {}", best.val_loss);
    }

    #[test]
    fn test_empty_validation_reports_nan() {
        let dir     = tempfile::tempdir().unwrap();
        let metrics = MetricsLogger::new(dir.path()).unwrap();
        let trained = run_training(
            &TrainConfig { epochs: 2, ..config() },
            &FaqClassifierConfig::new(4, 2),
            FaqDataset::new(separable()),
            FaqDataset::new(Vec::new()),
            &metrics,
        )
        .unwrap();
        assert!(trained.history[1].val_accuracy.is_nan());
        assert_eq!(trained.best_epoch, None);
    }

    #[test]
    fn test_no_training_samples_is_an_error() {
        let dir     = tempfile::tempdir().unwrap();
        let metrics = MetricsLogger::new(dir.path()).unwrap();
        let result  = run_training(
            &config(),
            &FaqClassifierConfig::new(4, 2),
            FaqDataset::new(Vec::new()),
            FaqDataset::new(Vec::new()),
            &metrics,
        );
        assert!(matches!(result, Err(BotError::Training(_))));
    }
}
