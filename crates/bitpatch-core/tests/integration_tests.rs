use bitpatch_core::{apply_patches, FileKind, Outcome, PatchError};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::{tempdir, TempDir};

const CONVERT_SCRIPT: &str = r#"#!/usr/bin/env python3

from __future__ import annotations

import gguf


class Model:
    _model_classes: dict[str, type[Model]] = {}

    model_arch: gguf.MODEL_ARCH

    def map_tensor_name(self, name: str, try_suffixes: Sequence[str] = (".weight", ".bias")) -> str:
        new_name = self.tensor_map.get_name(key=name, try_suffixes=try_suffixes)
        if new_name is None:
            raise ValueError(f"Can not map tensor {name!r}")
        return new_name


@Model.register("BloomForCausalLM")
class BloomModel(Model):
    model_arch = gguf.MODEL_ARCH.BLOOM


@Model.register("LLaMAForCausalLM", "LlamaForCausalLM", "MistralForCausalLM", "MixtralForCausalLM")
class LlamaModel(Model):
    model_arch = gguf.MODEL_ARCH.LLAMA

    def set_vocab(self):
        self._set_vocab_sentencepiece()
"#;

const SETUP_SCRIPT: &str = r#"import argparse
import os

SUPPORTED_HF_MODELS = {
    "1bitLLM/bitnet_b1_58-large": {
        "model_name": "bitnet_b1_58-large",
    },
    "microsoft/BitNet-b1.58-2B-4T": {
        "model_name": "BitNet-b1.58-2B-4T",
    },
}

SUPPORTED_QUANT_TYPES = {
    "arm64": ["i2_s", "tl1"],
    "x86_64": ["i2_s", "tl2"],
}
"#;

fn fixture(name: &str, content: &str) -> (TempDir, PathBuf) {
    let dir = tempdir().unwrap();
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    (dir, path)
}

fn read(path: &Path) -> String {
    fs::read_to_string(path).unwrap()
}

#[test]
fn test_convert_script_end_to_end() {
    let (_dir, path) = fixture("convert-hf-to-gguf-bitnet.py", CONVERT_SCRIPT);

    let report = apply_patches(&path, false).unwrap();
    assert_eq!(report.kind, FileKind::ConvertScript);
    assert!(report.written);

    let content = read(&path);
    assert!(content.contains(
        r#"@Model.register("LLaMAForCausalLM", "LlamaForCausalLM", "MistralForCausalLM", "MixtralForCausalLM", "BitNetForCausalLM")"#
    ));

    let llama_class = content.find("class LlamaModel(Model):").unwrap();
    let injected = content.find(r#"if "ffn_sub_norm" in name:"#).unwrap();
    assert!(injected > llama_class);
    assert!(content.contains(
        "    model_arch = gguf.MODEL_ARCH.LLAMA\n    def map_tensor_name(self, name: str"
    ));
    assert!(content.contains("    model_arch = gguf.MODEL_ARCH.BLOOM\n\n\n@Model.register"));
}

#[test]
fn test_convert_script_second_run_is_noop() {
    let (_dir, path) = fixture("convert-hf-to-gguf-bitnet.py", CONVERT_SCRIPT);

    apply_patches(&path, false).unwrap();
    let after_first = read(&path);

    let report = apply_patches(&path, false).unwrap();
    assert!(!report.written);
    assert!(report
        .reports
        .iter()
        .all(|r| r.outcome == Outcome::AlreadyApplied));
    assert_eq!(read(&path), after_first);
    assert_eq!(after_first.matches(r#"if "ffn_sub_norm" in name:"#).count(), 1);
}

#[test]
fn test_convert_script_without_anchors_is_untouched() {
    let original = "import gguf\n\nclass Model:\n    pass\n";
    let (_dir, path) = fixture("convert-hf-to-gguf-bitnet.py", original);

    let report = apply_patches(&path, false).unwrap();
    assert!(!report.changed);
    assert!(report
        .reports
        .iter()
        .all(|r| matches!(r.outcome, Outcome::MissingAnchor { .. })));
    assert_eq!(read(&path), original);
}

#[test]
fn test_setup_script_end_to_end() {
    let (_dir, path) = fixture("setup_env.py", SETUP_SCRIPT);

    apply_patches(&path, false).unwrap();
    apply_patches(&path, false).unwrap();

    let content = read(&path);
    assert!(content.contains(
        "SUPPORTED_HF_MODELS = {\n    \"microsoft/BitNet-b1.58-2B-4T-gguf\": {\n        \"model_name\": \"BitNet-b1.58-2B-4T\",\n    },\n    \"1bitLLM/bitnet_b1_58-large\": {"
    ));
    assert_eq!(content.matches("microsoft/BitNet-b1.58-2B-4T-gguf").count(), 1);
    assert!(content.ends_with(&SETUP_SCRIPT[SETUP_SCRIPT.find("\n    \"1bitLLM").unwrap()..]));
}

#[test]
fn test_setup_script_missing_registry_leaves_file() {
    let original = SETUP_SCRIPT.replace("SUPPORTED_HF_MODELS = {", "SUPPORTED_MODELS = {");
    let (_dir, path) = fixture("setup_env.py", &original);

    let err = apply_patches(&path, false).unwrap_err();
    assert!(matches!(err, PatchError::MissingAnchor { .. }));
    assert_eq!(read(&path), original);
}

#[test]
fn test_unknown_file_is_rejected_before_reading() {
    let dir = tempdir().unwrap();
    let err = apply_patches(&dir.path().join("README.md"), false).unwrap_err();
    assert!(err.to_string().contains("README.md"));
}

#[test]
fn test_missing_file_reports_io_error() {
    let dir = tempdir().unwrap();
    let err = apply_patches(&dir.path().join("setup_env.py"), false).unwrap_err();
    assert!(matches!(err, PatchError::Read { .. }));
}
