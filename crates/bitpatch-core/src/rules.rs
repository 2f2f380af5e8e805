//! The fixed patch set. Every literal here is matched byte for byte against
//! the upstream scripts, so whitespace inside the strings is significant.

use crate::types::{Edit, PatchRule};

pub const BITNET_ARCH: &str = "BitNetForCausalLM";

pub const LLAMA_REGISTER_LINE: &str = r#"@Model.register("LLaMAForCausalLM", "LlamaForCausalLM", "MistralForCausalLM", "MixtralForCausalLM")"#;
pub const LLAMA_REGISTER_LINE_WITH_BITNET: &str = r#"@Model.register("LLaMAForCausalLM", "LlamaForCausalLM", "MistralForCausalLM", "MixtralForCausalLM", "BitNetForCausalLM")"#;

pub const LLAMA_CLASS_DEF: &str = "class LlamaModel(Model):";
pub const LLAMA_ARCH_LINE: &str = "    model_arch = gguf.MODEL_ARCH.LLAMA";
pub const FFN_SUB_NORM_MARKER: &str = r#"if "ffn_sub_norm" in name:"#;
pub const TENSOR_MAPPING_METHOD: &str = concat!(
    "\n",
    "    def map_tensor_name(self, name: str, try_suffixes: Sequence[str] = (\".weight\", \".bias\")) -> str:\n",
    "        if \"ffn_sub_norm\" in name:\n",
    "            # Map model.layers.{bid}.mlp.ffn_sub_norm to blk.{bid}.ffn_norm\n",
    "            return name.replace(\"model.layers.\", \"blk.\").replace(\".mlp.ffn_sub_norm\", \".ffn_norm\")\n",
    "        return super().map_tensor_name(name, try_suffixes)\n",
);

pub const GGUF_REPO: &str = "microsoft/BitNet-b1.58-2B-4T-gguf";
pub const BASE_REPO_ENTRY: &str = r#""microsoft/BitNet-b1.58-2B-4T": {"#;
pub const SUPPORTED_MODELS_OPENING: &str = "SUPPORTED_HF_MODELS = {";
pub const GGUF_REPO_ENTRY: &str = concat!(
    "\n",
    "    \"microsoft/BitNet-b1.58-2B-4T-gguf\": {\n",
    "        \"model_name\": \"BitNet-b1.58-2B-4T\",\n",
    "    },",
);

pub const ARCH_REGISTRATION: PatchRule = PatchRule {
    name: "architecture registration",
    marker: LLAMA_REGISTER_LINE_WITH_BITNET,
    requires: &[],
    edit: Edit::Replace {
        target: LLAMA_REGISTER_LINE,
        replacement: LLAMA_REGISTER_LINE_WITH_BITNET,
    },
    critical: false,
};

pub const TENSOR_NAME_MAPPING: PatchRule = PatchRule {
    name: "tensor-name mapping",
    marker: FFN_SUB_NORM_MARKER,
    requires: &[LLAMA_CLASS_DEF],
    edit: Edit::InsertAfterLine {
        line: LLAMA_ARCH_LINE,
        within: Some(LLAMA_CLASS_DEF),
        text: TENSOR_MAPPING_METHOD,
    },
    critical: false,
};

pub const MODEL_REPO_ENTRY: PatchRule = PatchRule {
    name: "model repository entry",
    marker: GGUF_REPO,
    requires: &[BASE_REPO_ENTRY],
    edit: Edit::InsertAfter {
        anchor: SUPPORTED_MODELS_OPENING,
        text: GGUF_REPO_ENTRY,
    },
    critical: true,
};

pub const CONVERT_SCRIPT_RULES: &[PatchRule] = &[ARCH_REGISTRATION, TENSOR_NAME_MAPPING];
pub const SETUP_SCRIPT_RULES: &[PatchRule] = &[MODEL_REPO_ENTRY];
