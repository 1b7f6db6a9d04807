//! Native configs: serializable per-node descriptors referencing other
//! nodes by numeric tag. A whole graph exported in topological order can be
//! rebuilt in another context with [`NodeGraph::import_configs`].

use hashbrown::HashMap;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tween_api_core::Value;
use tween_color_core::Rgba;
use tween_easing_core::Easing;
use tween_interp_core::{ColorSpace, Extrapolation, InterpolationConfig, OutputRange};

use crate::animation::AnimationConfig;
use crate::error::GraphError;
use crate::graph::NodeGraph;
use crate::ids::{AnimationId, NodeId};
use crate::nodes::{InterpolationNode, NodeKind, StyleValue, TransformEntry, TransformValue};
use crate::topo::topo_order;

/// How a native interpolation's output range is encoded.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputType {
    /// Numbers are platform colors packed `0xAARRGGBB`.
    Color,
    /// Strings with embedded numbers.
    String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase", rename_all_fields = "camelCase")]
pub enum NativeTransform {
    Animated { property: String, node_tag: u64 },
    Static { property: String, value: Value },
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase", rename_all_fields = "camelCase")]
pub enum NativeConfig {
    Value {
        value: f64,
        offset: f64,
    },
    Interpolation {
        /// Tag of the interpolated node.
        input: u64,
        input_range: Vec<f64>,
        output_range: OutputRange,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        output_type: Option<OutputType>,
        extrapolate_left: Extrapolation,
        extrapolate_right: Extrapolation,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        easing: Option<Easing>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        color_space: Option<ColorSpace>,
    },
    Addition {
        input: [u64; 2],
    },
    Subtraction {
        input: [u64; 2],
    },
    Multiplication {
        input: [u64; 2],
    },
    Division {
        input: [u64; 2],
    },
    Modulus {
        input: u64,
        modulus: f64,
    },
    Diffclamp {
        input: u64,
        min: f64,
        max: f64,
    },
    Transform {
        transforms: Vec<NativeTransform>,
    },
    Tracking {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        animation_id: Option<AnimationId>,
        /// Tag of the followed node.
        to_value: u64,
        /// Tag of the animated value node.
        value: u64,
        animation_config: AnimationConfig,
    },
    /// Only top-level node entries are carried.
    Style {
        style: IndexMap<String, u64>,
    },
    Props {
        props: IndexMap<String, u64>,
    },
    Color {
        r: u64,
        g: u64,
        b: u64,
        a: u64,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        native_color: Option<u32>,
    },
}

impl NativeConfig {
    /// Tags this config depends on.
    pub fn inputs(&self) -> Vec<u64> {
        match self {
            NativeConfig::Value { .. } => Vec::new(),
            NativeConfig::Interpolation { input, .. }
            | NativeConfig::Modulus { input, .. }
            | NativeConfig::Diffclamp { input, .. } => vec![*input],
            NativeConfig::Addition { input }
            | NativeConfig::Subtraction { input }
            | NativeConfig::Multiplication { input }
            | NativeConfig::Division { input } => input.to_vec(),
            NativeConfig::Transform { transforms } => transforms
                .iter()
                .filter_map(|t| match t {
                    NativeTransform::Animated { node_tag, .. } => Some(*node_tag),
                    NativeTransform::Static { .. } => None,
                })
                .collect(),
            NativeConfig::Tracking { to_value, value, .. } => vec![*to_value, *value],
            NativeConfig::Style { style: tags } | NativeConfig::Props { props: tags } => {
                tags.values().copied().collect()
            }
            NativeConfig::Color { r, g, b, a, .. } => vec![*r, *g, *b, *a],
        }
    }
}

fn top_level_tags(map: &IndexMap<String, StyleValue>) -> IndexMap<String, u64> {
    map.iter()
        .filter_map(|(k, v)| match v {
            StyleValue::Node(id) => Some((k.clone(), id.tag())),
            _ => None,
        })
        .collect()
}

/// `0xAARRGGBB` to `rgba(R, G, B, A)`.
fn argb_to_rgba_text(argb: f64) -> String {
    Rgba::from_packed((argb as u32).rotate_left(8)).to_rgba_string()
}

impl NodeGraph {
    /// Numeric tag of a live node.
    pub fn node_tag(&self, id: NodeId) -> Result<u64, GraphError> {
        self.entry(id)?;
        Ok(id.tag())
    }

    pub fn native_config(&self, id: NodeId) -> Result<NativeConfig, GraphError> {
        let config = match &self.entry(id)?.kind {
            NodeKind::Value(v) => NativeConfig::Value {
                value: v.value,
                offset: v.offset,
            },
            NodeKind::Interpolation(n) => self.interpolation_native(n),
            NodeKind::Addition([a, b]) => NativeConfig::Addition {
                input: [a.tag(), b.tag()],
            },
            NodeKind::Subtraction([a, b]) => NativeConfig::Subtraction {
                input: [a.tag(), b.tag()],
            },
            NodeKind::Multiplication([a, b]) => NativeConfig::Multiplication {
                input: [a.tag(), b.tag()],
            },
            NodeKind::Division(d) => NativeConfig::Division {
                input: [d.input[0].tag(), d.input[1].tag()],
            },
            NodeKind::Modulo { input, modulus } => NativeConfig::Modulus {
                input: input.tag(),
                modulus: *modulus,
            },
            NodeKind::DiffClamp(d) => NativeConfig::Diffclamp {
                input: d.input.tag(),
                min: d.min,
                max: d.max,
            },
            NodeKind::Transform(entries) => NativeConfig::Transform {
                transforms: entries
                    .iter()
                    .map(|e| match &e.value {
                        TransformValue::Node(n) => NativeTransform::Animated {
                            property: e.property.clone(),
                            node_tag: n.tag(),
                        },
                        TransformValue::Static(v) => NativeTransform::Static {
                            property: e.property.clone(),
                            value: v.clone(),
                        },
                    })
                    .collect(),
            },
            NodeKind::Tracking(t) => NativeConfig::Tracking {
                animation_id: self.value_node(t.value).ok().and_then(|v| v.animation),
                to_value: t.parent.tag(),
                value: t.value.tag(),
                animation_config: t.config.clone(),
            },
            NodeKind::Style(style) => NativeConfig::Style {
                style: top_level_tags(style),
            },
            NodeKind::Props(p) => NativeConfig::Props {
                props: top_level_tags(&p.props),
            },
            NodeKind::Color(c) => {
                let [r, g, b, a] = c.channels.map(NodeId::tag);
                NativeConfig::Color {
                    r,
                    g,
                    b,
                    a,
                    native_color: c.native,
                }
            }
        };
        Ok(config)
    }

    fn interpolation_native(&self, n: &InterpolationNode) -> NativeConfig {
        let ex = n.config.extrapolation();
        let (output_range, output_type) =
            match (&n.config.output_range, self.native_colors(n)) {
                (_, Some(argb)) => (OutputRange::Numbers(argb), Some(OutputType::Color)),
                (OutputRange::Strings(s), None) => {
                    (OutputRange::Strings(s.clone()), Some(OutputType::String))
                }
                (OutputRange::Numbers(v), None) => (OutputRange::Numbers(v.clone()), None),
            };
        NativeConfig::Interpolation {
            input: n.parent.tag(),
            input_range: n.config.input_range.clone(),
            output_range,
            output_type,
            extrapolate_left: ex.extrapolate_left,
            extrapolate_right: ex.extrapolate_right,
            easing: n.config.easing.clone(),
            color_space: n.color_space,
        }
    }

    /// Output stops as platform colors, when every stop is a color.
    fn native_colors(&self, n: &InterpolationNode) -> Option<Vec<f64>> {
        let parser = self.ctx.colors();
        let packed: Option<Vec<u32>> = match &n.config.output_range {
            OutputRange::Strings(s) => s.iter().map(|t| parser.normalize(t.as_str())).collect(),
            OutputRange::Numbers(v) if n.color_space.is_some() => {
                v.iter().map(|c| parser.normalize(*c)).collect()
            }
            OutputRange::Numbers(_) => None,
        };
        packed.map(|p| {
            p.into_iter()
                .map(|c| Rgba::from_packed(c).to_argb() as f64)
                .collect()
        })
    }

    /// Every node's config, inputs before dependents.
    pub fn export_configs(&self) -> Result<Vec<(u64, NativeConfig)>, GraphError> {
        let nodes: Vec<(NodeId, Vec<NodeId>)> = self
            .nodes
            .iter()
            .map(|(id, entry)| (id, entry.kind.parents().to_vec()))
            .collect();
        topo_order(&nodes)?
            .into_iter()
            .map(|id| Ok((id.tag(), self.native_config(id)?)))
            .collect()
    }

    /// Build nodes from configs (in any order) and return the mapping from
    /// incoming tags to the new handles. On error nothing is kept.
    pub fn import_configs(
        &mut self,
        configs: &[(u64, NativeConfig)],
    ) -> Result<HashMap<u64, NodeId>, GraphError> {
        let mut by_tag: HashMap<u64, &NativeConfig> = HashMap::with_capacity(configs.len());
        for (tag, config) in configs {
            if by_tag.insert(*tag, config).is_some() {
                return Err(GraphError::DuplicateTag(*tag));
            }
        }
        let mut deps = Vec::with_capacity(configs.len());
        for (tag, config) in configs {
            let inputs = config.inputs();
            if let Some(missing) = inputs.iter().find(|t| !by_tag.contains_key(*t)) {
                return Err(GraphError::UnknownTag(*missing));
            }
            deps.push((*tag, inputs));
        }

        let mut created: HashMap<u64, NodeId> = HashMap::with_capacity(configs.len());
        for tag in topo_order(&deps)? {
            let Some(config) = by_tag.get(&tag).copied() else {
                continue;
            };
            match self.build_from_config(config, &created) {
                Ok(id) => {
                    created.insert(tag, id);
                }
                Err(err) => {
                    self.discard(created.values().copied());
                    return Err(err);
                }
            }
        }
        log::debug!("imported {} nodes", created.len());
        Ok(created)
    }

    fn build_from_config(
        &mut self,
        config: &NativeConfig,
        created: &HashMap<u64, NodeId>,
    ) -> Result<NodeId, GraphError> {
        let node = |tag: u64| created.get(&tag).copied().ok_or(GraphError::UnknownTag(tag));
        let id = match config {
            NativeConfig::Value { value, offset } => {
                let id = self.create_value(*value);
                self.set_offset(id, *offset)?;
                id
            }
            NativeConfig::Interpolation {
                input,
                input_range,
                output_range,
                output_type,
                extrapolate_left,
                extrapolate_right,
                easing,
                color_space,
            } => {
                let output_range = match (output_type, output_range) {
                    (Some(OutputType::Color), OutputRange::Numbers(argb)) => {
                        OutputRange::Strings(argb.iter().map(|c| argb_to_rgba_text(*c)).collect())
                    }
                    (_, range) => range.clone(),
                };
                let mut cfg = InterpolationConfig::new(input_range.clone(), output_range)
                    .with_extrapolate_left(*extrapolate_left)
                    .with_extrapolate_right(*extrapolate_right);
                cfg.easing = easing.clone();
                match color_space {
                    Some(space) => self.create_color_interpolation(node(*input)?, cfg, *space)?,
                    None => self.create_interpolation(node(*input)?, cfg)?,
                }
            }
            NativeConfig::Addition { input: [a, b] } => self.create_addition(node(*a)?, node(*b)?)?,
            NativeConfig::Subtraction { input: [a, b] } => {
                self.create_subtraction(node(*a)?, node(*b)?)?
            }
            NativeConfig::Multiplication { input: [a, b] } => {
                self.create_multiplication(node(*a)?, node(*b)?)?
            }
            NativeConfig::Division { input: [a, b] } => self.create_division(node(*a)?, node(*b)?)?,
            NativeConfig::Modulus { input, modulus } => self.create_modulo(node(*input)?, *modulus)?,
            NativeConfig::Diffclamp { input, min, max } => {
                self.create_diff_clamp(node(*input)?, *min, *max)?
            }
            NativeConfig::Transform { transforms } => {
                let entries = transforms
                    .iter()
                    .map(|t| match t {
                        NativeTransform::Animated { property, node_tag } => {
                            Ok(TransformEntry::animated(property.clone(), node(*node_tag)?))
                        }
                        NativeTransform::Static { property, value } => {
                            Ok(TransformEntry::fixed(property.clone(), value.clone()))
                        }
                    })
                    .collect::<Result<Vec<_>, GraphError>>()?;
                self.create_transform(entries)?
            }
            NativeConfig::Tracking {
                to_value,
                value,
                animation_config,
                ..
            } => self.create_tracking(node(*to_value)?, node(*value)?, animation_config.clone())?,
            NativeConfig::Style { style } => {
                let style = style
                    .iter()
                    .map(|(k, tag)| Ok((k.clone(), StyleValue::Node(node(*tag)?))))
                    .collect::<Result<IndexMap<_, _>, GraphError>>()?;
                self.create_style(style)?
            }
            NativeConfig::Props { props } => {
                let props = props
                    .iter()
                    .map(|(k, tag)| Ok((k.clone(), StyleValue::Node(node(*tag)?))))
                    .collect::<Result<IndexMap<_, _>, GraphError>>()?;
                self.create_props(props, None)?
            }
            NativeConfig::Color {
                r,
                g,
                b,
                a,
                native_color,
            } => self.create_color_from_channels(
                [node(*r)?, node(*g)?, node(*b)?, node(*a)?],
                *native_color,
            )?,
        };
        Ok(id)
    }
}
