//! MobileNet-style CNN for thermal risk classification
//!
//! A compact network built from depthwise separable convolutions, small
//! enough to run on CPU per request. Input arrives as NHWC (the layout the
//! preprocessor produces) and is permuted to NCHW before the first
//! convolution.

use burn::{
    module::Module,
    nn::{
        conv::{Conv2d, Conv2dConfig},
        pool::{AdaptiveAvgPool2d, AdaptiveAvgPool2dConfig},
        BatchNorm, BatchNormConfig, Dropout, DropoutConfig, Linear, LinearConfig, PaddingConfig2d,
        Relu,
    },
    tensor::{activation::softmax, backend::Backend, Tensor},
};

use super::config::ThermalNetConfig;

/// Strides of the separable blocks following the stem (224 → 112 → 56 → 28 → 14 → 14)
const BLOCK_STRIDES: [usize; 4] = [2, 2, 2, 1];

/// Depthwise 3x3 convolution followed by a pointwise 1x1 convolution,
/// each with BatchNorm and ReLU
#[derive(Module, Debug)]
pub struct SeparableBlock<B: Backend> {
    pub depthwise: Conv2d<B>,
    pub depthwise_bn: BatchNorm<B, 2>,
    pub pointwise: Conv2d<B>,
    pub pointwise_bn: BatchNorm<B, 2>,
    pub relu: Relu,
}

impl<B: Backend> SeparableBlock<B> {
    /// Create a new separable block
    pub fn new(in_channels: usize, out_channels: usize, stride: usize, device: &B::Device) -> Self {
        let depthwise = Conv2dConfig::new([in_channels, in_channels], [3, 3])
            .with_stride([stride, stride])
            .with_padding(PaddingConfig2d::Explicit(1, 1))
            .with_groups(in_channels)
            .with_bias(false)
            .init(device);

        let pointwise = Conv2dConfig::new([in_channels, out_channels], [1, 1])
            .with_bias(false)
            .init(device);

        Self {
            depthwise,
            depthwise_bn: BatchNormConfig::new(in_channels).init(device),
            pointwise,
            pointwise_bn: BatchNormConfig::new(out_channels).init(device),
            relu: Relu::new(),
        }
    }

    /// Forward pass through the block
    pub fn forward(&self, x: Tensor<B, 4>) -> Tensor<B, 4> {
        let x = self.depthwise.forward(x);
        let x = self.depthwise_bn.forward(x);
        let x = self.relu.forward(x);

        let x = self.pointwise.forward(x);
        let x = self.pointwise_bn.forward(x);
        self.relu.forward(x)
    }
}

/// Thermal risk classifier
///
/// Architecture:
/// - strided 3x3 stem convolution with BatchNorm and ReLU
/// - 4 depthwise separable blocks
/// - global average pooling
/// - dropout and a linear head producing one logit per risk level
#[derive(Module, Debug)]
pub struct ThermalNet<B: Backend> {
    pub stem: Conv2d<B>,
    pub stem_bn: BatchNorm<B, 2>,
    pub relu: Relu,
    pub blocks: Vec<SeparableBlock<B>>,
    pub global_pool: AdaptiveAvgPool2d,
    pub dropout: Dropout,
    pub head: Linear<B>,
}

impl ThermalNetConfig {
    /// Initialize a model with freshly sampled weights
    pub fn init<B: Backend>(&self, device: &B::Device) -> ThermalNet<B> {
        let widths = self.stage_widths();

        let stem = Conv2dConfig::new([self.in_channels, widths[0]], [3, 3])
            .with_stride([2, 2])
            .with_padding(PaddingConfig2d::Explicit(1, 1))
            .with_bias(false)
            .init(device);

        let blocks = BLOCK_STRIDES
            .iter()
            .enumerate()
            .map(|(i, &stride)| SeparableBlock::new(widths[i], widths[i + 1], stride, device))
            .collect();

        ThermalNet {
            stem,
            stem_bn: BatchNormConfig::new(widths[0]).init(device),
            relu: Relu::new(),
            blocks,
            global_pool: AdaptiveAvgPool2dConfig::new([1, 1]).init(),
            dropout: DropoutConfig::new(self.dropout_rate).init(),
            head: LinearConfig::new(widths[4], self.num_classes).init(device),
        }
    }
}

impl<B: Backend> ThermalNet<B> {
    /// Forward pass through the network
    ///
    /// # Arguments
    /// * `x` - Input tensor of shape [batch_size, height, width, 3]
    ///
    /// # Returns
    /// * Logits tensor of shape [batch_size, num_classes]
    pub fn forward(&self, x: Tensor<B, 4>) -> Tensor<B, 2> {
        // NHWC -> NCHW
        let x = x.permute([0, 3, 1, 2]);

        let x = self.stem.forward(x);
        let x = self.stem_bn.forward(x);
        let mut x = self.relu.forward(x);

        for block in &self.blocks {
            x = block.forward(x);
        }

        // [B, C, H, W] -> [B, C, 1, 1] -> [B, C]
        let x = self.global_pool.forward(x);
        let [batch_size, channels, _, _] = x.dims();
        let x = x.reshape([batch_size, channels]);

        let x = self.dropout.forward(x);
        self.head.forward(x)
    }

    /// Forward pass with softmax, giving one probability per class
    pub fn forward_softmax(&self, x: Tensor<B, 4>) -> Tensor<B, 2> {
        softmax(self.forward(x), 1)
    }
}
