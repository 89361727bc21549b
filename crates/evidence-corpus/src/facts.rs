//! Lexical fact extraction from record titles and abstracts.
//!
//! Twelve independent matchers, one per category: keyword membership for
//! methods, architectures, datasets, and applications; regex capture for
//! quantitative categories; sentence-window search for qualitative ones.
//! Every matcher is deterministic and returns its category sentinel on a
//! miss, never an empty string.

use std::collections::BTreeMap;
use std::collections::BTreeSet;
use std::sync::LazyLock;

use moka::sync::Cache;
use regex::Regex;

use crate::models::{FactSet, Record, sentinel};
use crate::text;

/// Specific method keywords, most specific first; the first three matches
/// are kept.
const METHOD_KEYWORDS: &[&str] = &[
    "resnet50",
    "resnet101",
    "resnet152",
    "resnet",
    "vgg16",
    "vgg19",
    "vgg",
    "xception",
    "xceptionnet",
    "efficientnet-b0",
    "efficientnet-b4",
    "efficientnet",
    "inception-v3",
    "inceptionv3",
    "inception",
    "densenet",
    "mobilenet",
    "squeezenet",
    "clip model",
    "clip",
    "bert",
    "gpt",
    "transformer",
    "lstm",
    "gru",
    "bilstm",
    "bi-lstm",
    "convolutional neural network",
    "cnn",
    "recurrent neural network",
    "rnn",
    "generative adversarial network",
    "gan",
    "autoencoder",
    "variational autoencoder",
    "vae",
    "attention mechanism",
    "self-attention",
    "multi-head attention",
    "vision transformer",
    "vit",
    "swin transformer",
    "capsule network",
    "graph neural network",
    "gnn",
    "support vector machine",
    "svm",
    "random forest",
    "ensemble learning",
    "ensemble method",
    "transfer learning",
    "federated learning",
    "reinforcement learning",
    "contrastive learning",
    "meta-learning",
    "few-shot learning",
    "zero-shot learning",
    "supervised learning",
    "unsupervised learning",
    "semi-supervised learning",
    "active learning",
];

const GENERIC_METHOD_KEYWORDS: &[&str] =
    &["deep learning", "machine learning", "neural network", "algorithm"];

const ARCHITECTURES: &[(&str, &str)] = &[
    ("resnet50", "ResNet50"),
    ("resnet101", "ResNet101"),
    ("resnet152", "ResNet152"),
    ("resnet", "ResNet"),
    ("vgg16", "VGG16"),
    ("vgg19", "VGG19"),
    ("xception", "Xception"),
    ("efficientnet", "EfficientNet"),
    ("inception", "Inception"),
    ("densenet", "DenseNet"),
    ("mobilenet", "MobileNet"),
    ("clip", "CLIP"),
    ("bert", "BERT"),
    ("transformer", "Transformer"),
    ("lstm", "LSTM"),
    ("gru", "GRU"),
    ("vision transformer", "Vision Transformer"),
    ("vit", "ViT"),
    ("swin transformer", "Swin Transformer"),
];

const COMPONENTS: &[(&str, &str)] = &[
    ("attention mechanism", "attention"),
    ("self-attention", "self-attention"),
    ("multi-head attention", "multi-head attention"),
    ("residual connection", "residual connections"),
    ("skip connection", "skip connections"),
    ("batch normalization", "batch normalization"),
    ("dropout", "dropout"),
    ("pooling", "pooling layers"),
    ("max pooling", "max pooling"),
    ("average pooling", "average pooling"),
    ("global average pooling", "global average pooling"),
    ("bottleneck", "bottleneck layers"),
    ("depthwise separable", "depthwise separable convolutions"),
    ("dilated convolution", "dilated convolutions"),
];

const LOSSES: &[(&str, &str)] = &[
    ("cross-entropy", "cross-entropy loss"),
    ("binary cross-entropy", "binary cross-entropy"),
    ("categorical cross-entropy", "categorical cross-entropy"),
    ("triplet loss", "triplet loss"),
    ("contrastive loss", "contrastive loss"),
    ("focal loss", "focal loss"),
    ("hinge loss", "hinge loss"),
    ("mean squared error", "MSE"),
    ("mean absolute error", "MAE"),
    ("huber loss", "Huber loss"),
];

const OPTIMIZERS: &[&str] = &["adam", "sgd", "rmsprop", "adagrad", "adamw"];

const DATASETS: &[(&str, &str)] = &[
    ("faceforensics++", "FaceForensics++"),
    ("faceforensics", "FaceForensics"),
    ("celeb-df", "Celeb-DF"),
    ("celebdf", "Celeb-DF"),
    ("dfdc", "DFDC"),
    ("deepfake detection challenge", "DFDC"),
    ("facebook deepfake detection", "DFDC"),
    ("wild deepfake", "WildDeepfake"),
    ("deepfake in the wild", "DFITW"),
    ("imagenet", "ImageNet"),
    ("coco", "COCO"),
    ("cifar-10", "CIFAR-10"),
    ("cifar-100", "CIFAR-100"),
    ("mnist", "MNIST"),
    ("fashionmnist", "FashionMNIST"),
    ("vggface", "VGGFace"),
    ("vggface2", "VGGFace2"),
    ("lfw", "LFW"),
    ("youtube faces", "YouTube Faces"),
    ("kinetics", "Kinetics"),
    ("ucf-101", "UCF-101"),
    ("hmdb-51", "HMDB-51"),
];

const AUGMENTATIONS: &[&str] = &[
    "data augmentation",
    "random crop",
    "random flip",
    "rotation",
    "color jittering",
    "mixup",
    "cutmix",
    "randaugment",
];

const APPLICATION_KEYWORDS: &[&str] = &[
    "deepfake detection",
    "face manipulation",
    "face forgery",
    "healthcare",
    "medical",
    "clinical",
    "diagnosis",
    "treatment",
    "finance",
    "financial",
    "banking",
    "trading",
    "investment",
    "security",
    "cybersecurity",
    "privacy",
    "encryption",
    "authentication",
    "network",
    "networking",
    "communication",
    "protocol",
    "iot",
    "internet of things",
    "sensor",
    "embedded",
    "cloud",
    "cloud computing",
    "distributed",
    "edge computing",
    "5g",
    "6g",
    "wireless",
    "mobile",
    "cellular",
    "autonomous",
    "robotics",
    "control",
    "navigation",
    "detection",
    "prediction",
    "classification",
    "recognition",
    "manufacturing",
    "industrial",
    "production",
    "quality control",
    "smart city",
    "smart cities",
    "urban",
    "infrastructure",
    "transportation",
    "traffic",
    "vehicle",
    "driving",
    "energy",
    "power",
    "grid",
    "renewable",
    "agriculture",
    "farming",
    "crop",
    "precision agriculture",
    "education",
    "learning",
    "teaching",
    "e-learning",
    "social media",
    "recommendation",
    "personalization",
];

const RESULT_KEYWORDS: &[&str] = &[
    "accuracy",
    "precision",
    "recall",
    "f1-score",
    "f1 score",
    "performance",
    "efficiency",
    "effectiveness",
    "improvement",
    "reduction",
    "increase",
    "throughput",
    "latency",
    "speed",
    "scalability",
    "robustness",
    "auc",
    "error rate",
    "success rate",
];

const CHALLENGE_KEYWORDS: &[&str] = &[
    "challenge",
    "limitation",
    "difficulty",
    "problem",
    "issue",
    "constraint",
    "bottleneck",
    "gap",
    "barrier",
    "obstacle",
    "drawback",
    "weakness",
    "shortcoming",
    "fails to",
    "unable to",
    "however",
    "but",
    "unfortunately",
    "despite",
];

const CONTRIBUTION_FALLBACK_KEYWORDS: &[&str] = &[
    "novel architecture",
    "improved performance",
    "new method",
    "enhanced accuracy",
    "better generalization",
    "robust detection",
    "efficient approach",
    "scalable solution",
    "comprehensive evaluation",
];

const KNOWN_BASELINE_MODELS: &[&str] = &[
    "ResNet",
    "ResNet50",
    "ResNet101",
    "VGG",
    "VGG16",
    "VGG19",
    "Xception",
    "XceptionNet",
    "EfficientNet",
    "Inception",
    "MobileNet",
    "DenseNet",
    "AlexNet",
    "GoogleNet",
    "LSTM",
    "GRU",
    "Transformer",
    "BERT",
    "CNN",
];

fn regexes(patterns: &[&str]) -> Vec<Regex> {
    patterns.iter().map(|p| Regex::new(p).expect("valid regex")).collect()
}

static FINDING_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    regexes(&[
        r"(?i)achieve[ds]?\s+(\d+\.?\d*%)",
        r"(?i)(\d+\.?\d*%)\s+accuracy",
        r"(?i)(\d+\.?\d*%)\s+precision",
        r"(?i)improve[ds]?\s+(?:by\s+)?(\d+\.?\d*%)",
        r"(?i)outperform[s]?\s+([\w\s]{5,60})",
        r"(?i)demonstrate[ds]?\s+([\w\s]{10,80})",
        r"(?i)show[ns]?\s+that\s+([\w\s]{10,100})",
        r"(?i)found\s+that\s+([\w\s]{10,100})",
        r"(?i)reveal[s]?\s+([\w\s]{10,80})",
        r"(?i)confirm[s]?\s+([\w\s]{10,80})",
        r"(?i)(?:results?|findings?)\s+(?:show|indicate|suggest|demonstrate)\s+([\w\s]{10,100})",
    ])
});

static SIGNIFICANT_CONTEXT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)significant\s+([\w\s]{10,80})").expect("valid regex"));

static CONTRIBUTION_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    regexes(&[
        r"(?i)contribut(?:e|ion)[s]?\s+([\w\s]{15,100})",
        r"(?i)novelty\s+([\w\s]{15,100})",
        r"(?i)innovation\s+([\w\s]{15,100})",
        r"(?i)advance[s]?\s+([\w\s]{15,100})",
        r"(?i)propose[d]?\s+([\w\s]{15,100})",
        r"(?i)(?:we|this)\s+(?:present|introduce|develop)\s+([\w\s]{15,100})",
    ])
});

static SPECIFIC_CONTRIBUTION_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    regexes(&[
        r"(?:we|this paper|this work|our)\s+(?:propose|present|introduce|develop)(?:s|ed)?\s+([\w\s]{15,100})",
        r"(?:novel|new)\s+([\w\s]{10,80})\s+(?:for|to|that)",
        r"contribut(?:e|ion)[s]?\s+(?:is|are|include[s]?)?\s*([\w\s]{15,100})",
        r"main\s+contribution[s]?\s+(?:is|are|include[s]?)?\s*([\w\s]{15,100})",
    ])
});

static BASELINE_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    regexes(&[
        r"outperform(?:s|ed|ing)?\s+([A-Z][a-zA-Z0-9-]+(?:\s+[A-Z][a-zA-Z0-9-]+)?)",
        r"compared?\s+(?:to|with|against)\s+([A-Z][a-zA-Z0-9-]+(?:\s+[A-Z][a-zA-Z0-9-]+)?)",
        r"baseline[s]?\s+(?:such as|including|like)?\s*:?\s*([A-Z][a-zA-Z0-9-]+)",
        r"(?:better|superior)\s+than\s+([A-Z][a-zA-Z0-9-]+)",
        r"vs\.?\s+([A-Z][a-zA-Z0-9-]+)",
        r"than\s+([A-Z][a-zA-Z0-9-]+(?:\s+[A-Z][a-zA-Z0-9-]+)?)\s+\(",
    ])
});

static ACCURACY_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    regexes(&[
        r"(?i)accuracy\s+(?:of\s+|:\s*)?(\d+\.?\d*%?)",
        r"(?i)acc\s+(?:of\s+|:\s*)?(\d+\.?\d*%?)",
        r"(?i)achieves?\s+(\d+\.?\d*%?)\s+accuracy",
        r"(?i)(\d+\.?\d*%?)\s+accuracy",
    ])
});

static AUC_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    regexes(&[
        r"(?i)auc\s+(?:of\s+|:\s*)?(\d+\.?\d*)",
        r"(?i)area\s+under\s+(?:the\s+)?curve\s+(?:of\s+)?(\d+\.?\d*)",
        r"(?i)roc[-\s]auc\s+(?:of\s+)?(\d+\.?\d*)",
    ])
});

static F1_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    regexes(&[
        r"(?i)f1[-\s]score\s+(?:of\s+|:\s*)?(\d+\.?\d*%?)",
        r"(?i)f1\s+(?:of\s+|:\s*)?(\d+\.?\d*%?)",
    ])
});

static PRECISION_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)precision\s+(?:of\s+|:\s*)?(\d+\.?\d*%?)").expect("valid regex"));

static RECALL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)recall\s+(?:of\s+|:\s*)?(\d+\.?\d*%?)").expect("valid regex"));

static EPOCHS_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+)\s*epochs?").expect("valid regex"));

static BATCH_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"batch\s+size\s+(?:of\s+)?(\d+)").expect("valid regex"));

static LR_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    regexes(&[r"learning\s+rate\s+(?:of\s+)?(\d+\.?\d*e?-?\d*)", r"lr\s*=\s*(\d+\.?\d*e?-?\d*)"])
});

static WEIGHT_DECAY_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"weight\s+decay\s+(?:of\s+)?(\d+\.?\d*e?-?\d*)").expect("valid regex"));

static DATASET_SIZE_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    regexes(&[
        r"(\d+[,\s]*\d*k?\s*(?:images?|videos?|samples?|frames?|examples?))",
        r"(\d+[,\s]*\d*\s*thousand\s*(?:images?|videos?|samples?))",
        r"(\d+[,\s]*\d*\s*million\s*(?:images?|videos?|samples?))",
        r"dataset\s+(?:of|with|containing)\s+(\d+[,\s]*\d*k?\s*(?:images?|videos?|samples?))",
    ])
});

static NUMBER_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+\.?\d*%?").expect("valid regex"));

static ACHIEVED_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)achiev(?:e|ed|es|ing)\s+(\d+\.?\d*%?)").expect("valid regex"));

/// Stateless fact-extraction service with a per-record-identity cache.
///
/// One extractor instance is shared across a pipeline; it carries no
/// mutable state beyond the cache, so repeated calls on the same record
/// always yield the same [`FactSet`].
pub struct FactExtractor {
    cache: Cache<String, FactSet>,
}

impl FactExtractor {
    /// Create an extractor with the given cache capacity.
    #[must_use]
    pub fn new(cache_capacity: u64) -> Self {
        Self { cache: Cache::new(cache_capacity) }
    }

    /// Extract all fact categories from a record, using the cache when the
    /// record's identity has been seen before.
    #[must_use]
    pub fn extract(&self, record: &Record) -> FactSet {
        let key = record.lookup_key();
        if let Some(cached) = self.cache.get(&key) {
            return cached;
        }

        let facts = Self::extract_uncached(record);
        self.cache.insert(key, facts.clone());
        facts
    }

    fn extract_uncached(record: &Record) -> FactSet {
        let abstract_text = record.abstract_text.as_str();
        let title = record.title.as_str();

        FactSet {
            method: extract_method(abstract_text, title),
            finding: extract_finding(abstract_text),
            result: extract_result(abstract_text),
            challenge: extract_challenge(abstract_text),
            application: extract_application(abstract_text, title),
            contribution: extract_contribution(abstract_text),
            architecture_details: extract_architecture_details(abstract_text, title),
            dataset_info: extract_dataset_info(abstract_text),
            training_details: extract_training_details(abstract_text),
            metrics_detailed: extract_detailed_metrics(abstract_text),
            baseline_comparison: extract_baseline_comparison(abstract_text),
            specific_contributions: extract_specific_contributions(abstract_text),
        }
    }
}

impl Default for FactExtractor {
    fn default() -> Self {
        Self::new(1000)
    }
}

impl std::fmt::Debug for FactExtractor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FactExtractor").field("cached", &self.cache.entry_count()).finish()
    }
}

fn combined_lower(text: &str, title: &str) -> String {
    format!("{text} {title}").to_lowercase()
}

fn extract_method(text: &str, title: &str) -> String {
    let haystack = combined_lower(text, title);

    let found: Vec<&str> =
        METHOD_KEYWORDS.iter().filter(|kw| haystack.contains(*kw)).take(3).copied().collect();
    if !found.is_empty() {
        return found.join(", ");
    }

    for kw in GENERIC_METHOD_KEYWORDS {
        if haystack.contains(kw) {
            return (*kw).to_string();
        }
    }

    sentinel::METHOD.to_string()
}

fn extract_architecture_details(text: &str, title: &str) -> String {
    let haystack = combined_lower(text, title);
    let mut details: Vec<String> = Vec::new();

    let architectures: Vec<&str> = ARCHITECTURES
        .iter()
        .filter(|(key, _)| haystack.contains(key))
        .map(|(_, name)| *name)
        .take(3)
        .collect();
    if !architectures.is_empty() {
        details.push(format!("architecture: {}", architectures.join(", ")));
    }

    let components: Vec<&str> = COMPONENTS
        .iter()
        .filter(|(key, _)| haystack.contains(key))
        .map(|(_, name)| *name)
        .take(3)
        .collect();
    if !components.is_empty() {
        details.push(format!("components: {}", components.join(", ")));
    }

    if let Some((_, name)) = LOSSES.iter().find(|(key, _)| haystack.contains(key)) {
        details.push(format!("loss: {name}"));
    }

    if let Some(optimizer) = OPTIMIZERS.iter().find(|opt| haystack.contains(*opt)) {
        details.push(format!("optimizer: {}", optimizer.to_uppercase()));
    }

    if haystack.contains("pre-trained") || haystack.contains("pretrained") {
        details.push("pre-trained on ImageNet".to_string());
    }
    if haystack.contains("fine-tun") {
        details.push("fine-tuned".to_string());
    }
    if haystack.contains("transfer learning") {
        details.push("transfer learning".to_string());
    }

    if details.is_empty() { sentinel::ARCHITECTURE.to_string() } else { details.join("; ") }
}

fn extract_dataset_info(text: &str) -> String {
    let haystack = text.to_lowercase();

    let names: Vec<&str> = DATASETS
        .iter()
        .filter(|(key, _)| haystack.contains(key))
        .map(|(_, name)| *name)
        .take(3)
        .collect();

    let size = DATASET_SIZE_PATTERNS
        .iter()
        .find_map(|p| p.captures(&haystack))
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string());

    let mut parts: Vec<String> = Vec::new();
    if !names.is_empty() {
        parts.push(names.join(", "));
    }
    if let Some(size) = size {
        parts.push(format!("({size})"));
    }

    if !parts.is_empty() {
        return parts.join(" ");
    }

    if haystack.contains("dataset") {
        return sentinel::DATASET_CUSTOM.to_string();
    }
    sentinel::DATASET.to_string()
}

fn extract_training_details(text: &str) -> String {
    let haystack = text.to_lowercase();
    let mut details: Vec<String> = Vec::new();

    if let Some(c) = EPOCHS_PATTERN.captures(&haystack) {
        details.push(format!("{} epochs", &c[1]));
    }
    if let Some(c) = BATCH_PATTERN.captures(&haystack) {
        details.push(format!("batch size {}", &c[1]));
    }
    if let Some(c) = LR_PATTERNS.iter().find_map(|p| p.captures(&haystack)) {
        details.push(format!("learning rate {}", &c[1]));
    }
    if let Some(aug) = AUGMENTATIONS.iter().find(|a| haystack.contains(*a)) {
        details.push(format!("augmentation: {aug}"));
    }
    if haystack.contains("early stopping") {
        details.push("early stopping".to_string());
    }
    if haystack.contains("learning rate schedule") || haystack.contains("lr schedule") {
        details.push("learning rate scheduling".to_string());
    }
    if haystack.contains("weight decay") {
        if let Some(c) = WEIGHT_DECAY_PATTERN.captures(&haystack) {
            details.push(format!("weight decay {}", &c[1]));
        }
    }

    if details.is_empty() { sentinel::TRAINING.to_string() } else { details.join("; ") }
}

/// Values without a percent sign that parse at or below 1.0 are fractions;
/// convert them, e.g. `0.95` becomes `95.0%`.
fn normalize_accuracy(value: &str) -> String {
    if value.contains('%') {
        return value.to_string();
    }
    match value.parse::<f64>() {
        Ok(v) if v <= 1.0 => format!("{:.1}%", v * 100.0),
        _ => format!("{value}%"),
    }
}

fn extract_detailed_metrics(text: &str) -> BTreeMap<String, String> {
    let mut metrics = BTreeMap::new();

    if let Some(c) = ACCURACY_PATTERNS.iter().find_map(|p| p.captures(text)) {
        metrics.insert("accuracy".to_string(), normalize_accuracy(&c[1]));
    }
    if let Some(c) = AUC_PATTERNS.iter().find_map(|p| p.captures(text)) {
        metrics.insert("auc".to_string(), c[1].to_string());
    }
    if let Some(c) = F1_PATTERNS.iter().find_map(|p| p.captures(text)) {
        metrics.insert("f1_score".to_string(), c[1].to_string());
    }
    if let Some(c) = PRECISION_PATTERN.captures(text) {
        metrics.insert("precision".to_string(), c[1].to_string());
    }
    if let Some(c) = RECALL_PATTERN.captures(text) {
        metrics.insert("recall".to_string(), c[1].to_string());
    }

    metrics
}

fn extract_baseline_comparison(text: &str) -> String {
    // BTreeSet keeps the output deterministic regardless of match order.
    let mut baselines: BTreeSet<String> = BTreeSet::new();

    for pattern in BASELINE_PATTERNS.iter() {
        for captures in pattern.captures_iter(text).take(5) {
            if let Some(m) = captures.get(1) {
                let name = m.as_str().trim();
                if name.len() > 2 && name.len() < 30 {
                    baselines.insert(name.to_string());
                }
            }
        }
    }

    let haystack = text.to_lowercase();
    let has_comparison_language = ["compared", "baseline", "outperform", "versus", "vs"]
        .iter()
        .any(|kw| haystack.contains(kw));
    if has_comparison_language {
        for model in KNOWN_BASELINE_MODELS {
            if haystack.contains(&model.to_lowercase()) {
                baselines.insert((*model).to_string());
            }
        }
    }

    let list: Vec<String> = baselines.into_iter().take(5).collect();
    if !list.is_empty() {
        return list.join(", ");
    }

    if haystack.contains("baseline") || haystack.contains("compared") {
        return sentinel::BASELINE_UNNAMED.to_string();
    }
    sentinel::BASELINE.to_string()
}

fn extract_specific_contributions(text: &str) -> String {
    let haystack = text.to_lowercase();
    let mut contributions: Vec<String> = Vec::new();

    for pattern in SPECIFIC_CONTRIBUTION_PATTERNS.iter() {
        for captures in pattern.captures_iter(&haystack).take(2) {
            if let Some(m) = captures.get(1) {
                let cleaned = m.as_str().trim();
                if cleaned.len() > 10 && cleaned.len() < 150 {
                    contributions.push(cleaned.to_string());
                }
            }
        }
    }

    if contributions.is_empty() {
        contributions.extend(
            CONTRIBUTION_FALLBACK_KEYWORDS
                .iter()
                .filter(|kw| haystack.contains(*kw))
                .take(2)
                .map(|kw| (*kw).to_string()),
        );
    }

    if contributions.is_empty() {
        return sentinel::SPECIFIC_CONTRIBUTIONS.to_string();
    }
    contributions.truncate(3);
    contributions.join("; ")
}

fn extract_finding(text: &str) -> String {
    for pattern in FINDING_PATTERNS.iter() {
        if let Some(m) = pattern.find(text) {
            let finding = m.as_str();
            let len = text::char_len(finding);
            if len > 10 && len < 200 {
                return text::truncate_chars(finding, 150).to_string();
            }
        }
    }

    if text.to_lowercase().contains("significant") {
        if let Some(c) = SIGNIFICANT_CONTEXT.captures(text) {
            return format!("significant {}", &c[1]);
        }
        return "significant improvements in performance metrics".to_string();
    }

    sentinel::FINDING.to_string()
}

fn extract_result(text: &str) -> String {
    for keyword in RESULT_KEYWORDS {
        if let Some(idx) = text::find_ignore_case(text, keyword) {
            let context = text::window(text, idx, 80, 150);
            if let Some(m) = NUMBER_PATTERN.find(context) {
                let mut num = m.as_str().to_string();
                if !num.contains('%') {
                    if let Ok(v) = num.parse::<f64>() {
                        if v <= 1.0 {
                            num = format!("{:.1}%", v * 100.0);
                        } else if v > 10.0 {
                            num = format!("{num}%");
                        }
                    }
                }
                return format!("{keyword} of {num}");
            }
        }
    }

    if let Some(c) = ACHIEVED_PATTERN.captures(text) {
        return format!("achieved {}", &c[1]);
    }

    sentinel::RESULT.to_string()
}

fn extract_challenge(text: &str) -> String {
    for keyword in CHALLENGE_KEYWORDS {
        if let Some(idx) = text::find_ignore_case(text, keyword) {
            let context = text::window(text, idx, 20, 150);
            if context.trim().len() <= 30 {
                continue;
            }
            for sentence in context.split(['.', '!', '?']) {
                if sentence.to_lowercase().contains(keyword) && sentence.trim().len() > 20 {
                    return sentence.trim().to_string();
                }
            }
        }
    }

    sentinel::CHALLENGE.to_string()
}

fn extract_application(text: &str, title: &str) -> String {
    let haystack = combined_lower(text, title);

    let found: Vec<&str> =
        APPLICATION_KEYWORDS.iter().filter(|kw| haystack.contains(*kw)).take(2).copied().collect();
    if found.is_empty() { sentinel::APPLICATION.to_string() } else { found.join(", ") }
}

fn extract_contribution(text: &str) -> String {
    for pattern in CONTRIBUTION_PATTERNS.iter() {
        if let Some(m) = pattern.find(text) {
            let contribution = m.as_str();
            let len = text::char_len(contribution);
            if len > 20 && len < 150 {
                return text::truncate_chars(contribution, 120).to_string();
            }
        }
    }
    sentinel::CONTRIBUTION.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record_with_abstract(abstract_text: &str) -> Record {
        Record {
            title: "A Study".to_string(),
            authors: vec!["A".to_string()],
            abstract_text: abstract_text.to_string(),
            ..Record::default()
        }
    }

    #[test]
    fn test_method_specific_before_generic() {
        let m = extract_method("We use a vision transformer and an lstm baseline.", "");
        assert!(m.contains("transformer"));
        assert!(m.contains("lstm"));

        let m = extract_method("A deep learning pipeline.", "");
        assert_eq!(m, "deep learning");

        assert_eq!(extract_method("A clever proof.", ""), sentinel::METHOD);
    }

    #[test]
    fn test_architecture_details_segments() {
        let details = extract_architecture_details(
            "A resnet50 with self-attention trained with focal loss using adam.",
            "",
        );
        assert!(details.contains("architecture: ResNet50"));
        assert!(details.contains("self-attention"));
        assert!(details.contains("loss: focal loss"));
        assert!(details.contains("optimizer: ADAM"));
    }

    #[test]
    fn test_fraction_accuracy_becomes_percentage() {
        let metrics = extract_detailed_metrics("The model achieved 0.95 accuracy on the test set.");
        assert_eq!(metrics.get("accuracy").map(String::as_str), Some("95.0%"));
    }

    #[test]
    fn test_bare_accuracy_gets_percent_sign() {
        let metrics = extract_detailed_metrics("accuracy of 97.3 was observed");
        assert_eq!(metrics.get("accuracy").map(String::as_str), Some("97.3%"));

        let metrics = extract_detailed_metrics("accuracy of 92.5% was observed");
        assert_eq!(metrics.get("accuracy").map(String::as_str), Some("92.5%"));
    }

    #[test]
    fn test_auc_and_f1() {
        let metrics = extract_detailed_metrics("We report an AUC of 0.98 and F1-score of 0.91.");
        assert_eq!(metrics.get("auc").map(String::as_str), Some("0.98"));
        assert_eq!(metrics.get("f1_score").map(String::as_str), Some("0.91"));
    }

    #[test]
    fn test_training_details() {
        let details = extract_training_details(
            "Trained for 50 epochs with batch size 32 and learning rate 0.001, using mixup and early stopping.",
        );
        assert!(details.contains("50 epochs"));
        assert!(details.contains("batch size 32"));
        assert!(details.contains("learning rate 0.001"));
        assert!(details.contains("augmentation: mixup"));
        assert!(details.contains("early stopping"));
    }

    #[test]
    fn test_dataset_names_and_size() {
        let info = extract_dataset_info("Evaluated on FaceForensics++ and Celeb-DF with 10000 videos.");
        assert!(info.contains("FaceForensics++"));
        assert!(info.contains("Celeb-DF"));
        assert!(info.contains("(10000 videos)"));

        assert_eq!(extract_dataset_info("We built a dataset of interviews."), "custom dataset");
        assert_eq!(extract_dataset_info("No data mentioned."), sentinel::DATASET);
    }

    #[test]
    fn test_challenge_window() {
        let c = extract_challenge(
            "Models perform well in the lab. However, generalization to unseen forgeries remains a challenge for all methods.",
        );
        assert!(c.to_lowercase().contains("challenge") || c.to_lowercase().contains("however"));
        assert!(!c.is_empty());
    }

    #[test]
    fn test_baseline_named_models() {
        let b = extract_baseline_comparison("Our approach outperforms Xception and VGG16 baselines.");
        assert!(b.contains("Xception"));
        assert!(b.contains("VGG16"));
    }

    #[test]
    fn test_baseline_unnamed_comparison() {
        let b = extract_baseline_comparison("compared against several unnamed systems");
        assert_eq!(b, sentinel::BASELINE_UNNAMED);
        assert_eq!(extract_baseline_comparison("no comparison at all"), sentinel::BASELINE);
    }

    #[test]
    fn test_no_category_is_ever_empty() {
        let extractor = FactExtractor::default();
        let facts = extractor.extract(&record_with_abstract("Entirely unrelated prose."));

        for value in [
            &facts.method,
            &facts.finding,
            &facts.result,
            &facts.challenge,
            &facts.application,
            &facts.contribution,
            &facts.architecture_details,
            &facts.dataset_info,
            &facts.training_details,
            &facts.baseline_comparison,
            &facts.specific_contributions,
        ] {
            assert!(!value.is_empty());
        }
    }

    #[test]
    fn test_extract_is_deterministic_and_cached() {
        let extractor = FactExtractor::default();
        let record = record_with_abstract(
            "We propose a transformer detector that achieved 0.95 accuracy, outperforming Xception.",
        );

        let first = extractor.extract(&record);
        let second = extractor.extract(&record);
        assert_eq!(first, second);
    }
}
