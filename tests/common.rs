//! Common test utilities for building workflows and forms.
use nodeform::prelude::*;

/// A text-to-image workflow in API format, as ComfyUI exports it.
///
/// Node "3" is a KSampler whose `model` input is a reference to node "4".
#[allow(dead_code)]
pub const KSAMPLER_WORKFLOW_JSON: &str = r#"{
  "3": {
    "inputs": {
      "seed": 156680208700286,
      "steps": 20,
      "cfg": 8,
      "sampler_name": "euler",
      "scheduler": "normal",
      "denoise": 1,
      "model": ["4", 0],
      "positive": ["6", 0],
      "negative": ["7", 0],
      "latent_image": ["5", 0]
    },
    "class_type": "KSampler",
    "_meta": { "title": "KSampler" }
  },
  "4": {
    "inputs": { "ckpt_name": "v1-5-pruned-emaonly.safetensors" },
    "class_type": "CheckpointLoaderSimple",
    "_meta": { "title": "Load Checkpoint" }
  },
  "5": {
    "inputs": { "width": 512, "height": 512, "batch_size": 1 },
    "class_type": "EmptyLatentImage",
    "_meta": { "title": "Empty Latent Image" }
  },
  "6": {
    "inputs": { "text": "a photo of a cat", "clip": ["4", 1] },
    "class_type": "CLIPTextEncode",
    "_meta": { "title": "Positive Prompt" }
  },
  "7": {
    "inputs": { "text": "blurry", "clip": ["4", 1] },
    "class_type": "CLIPTextEncode"
  },
  "10": {
    "inputs": { "samples": ["3", 0], "vae": ["4", 2] },
    "class_type": "VAEDecode",
    "_meta": { "title": "VAE Decode" }
  }
}"#;

/// The smallest valid workflow: one node with a literal and a reference.
#[allow(dead_code)]
pub const SINGLE_NODE_JSON: &str =
    r#"{"3":{"inputs":{"seed":1,"model":["4",0]},"class_type":"KSampler"}}"#;

/// Creates a builder holding four text components labelled A, B, C and D.
#[allow(dead_code)]
pub fn create_abcd_builder() -> (FormBuilder, Vec<ComponentId>) {
    let mut builder = FormBuilder::new();
    let ids: Vec<ComponentId> = ["A", "B", "C", "D"]
        .into_iter()
        .map(|label| {
            let id = builder.add(ComponentKind::Text);
            builder
                .update_component(id, &ComponentUpdate::new().label(label))
                .expect("fresh component should update");
            id
        })
        .collect();
    (builder, ids)
}

/// The labels of `builder`'s components, in order.
#[allow(dead_code)]
pub fn labels(builder: &FormBuilder) -> Vec<&str> {
    builder.components().iter().map(|c| c.label.as_str()).collect()
}

/// Parses the KSampler workflow fixture.
#[allow(dead_code)]
pub fn ksampler_workflow() -> WorkflowDocument {
    parse_and_validate(KSAMPLER_WORKFLOW_JSON).expect("fixture should be a valid workflow")
}
