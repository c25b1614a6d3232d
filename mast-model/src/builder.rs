//! Model builder - turns an input document into model construction commands
//!
//! Each build step walks one entity list in document order and submits the
//! resulting commands to a [`ModelSession`]. State shared between steps (the
//! section registry and the nodal load counter) is passed in and returned
//! explicitly, so every step can be run and tested on its own.

use serde::{Deserialize, Serialize};

use crate::commands::ModelCommand;
use crate::config::{BuilderConfig, LoadNumbering};
use crate::elements::{FrameElement, Node, Support};
use crate::error::{BuildError, BuildResult};
use crate::loads::{LoadCase, NodalLoad, PredefinedNodeDisplacement};
use crate::model::FeaInput;
use crate::sections::{RegisteredSection, SectionRegistry};
use crate::session::ModelSession;
use crate::validation::validate_document;

/// Next generated nodal load number.
///
/// Advances only when a load is actually created. `issued` keeps the total
/// across restarts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadCounter {
    next: u32,
    issued: u32,
}

impl LoadCounter {
    pub fn new() -> Self {
        Self { next: 1, issued: 0 }
    }

    /// Number the next created load will get
    pub fn peek(&self) -> u32 {
        self.next
    }

    /// Take the current number and return the advanced counter
    pub fn take(self) -> (u32, Self) {
        (
            self.next,
            Self {
                next: self.next + 1,
                issued: self.issued + 1,
            },
        )
    }

    /// Start numbering at 1 again
    pub fn restart(self) -> Self {
        Self { next: 1, ..self }
    }

    /// Loads created so far
    pub fn issued(&self) -> u32 {
        self.issued
    }
}

impl Default for LoadCounter {
    fn default() -> Self {
        Self::new()
    }
}

/// What a full build emitted
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BuildSummary {
    pub model_name: String,
    pub nodes: usize,
    pub sections: Vec<RegisteredSection>,
    pub members: usize,
    pub cable_members: usize,
    pub supports: usize,
    pub load_cases: usize,
    pub nodal_loads: usize,
    pub skipped_loads: usize,
    pub imposed_deformations: usize,
    pub commands: usize,
}

/// Translates input documents into commands for one configuration
#[derive(Debug, Clone, Default)]
pub struct ModelBuilder {
    config: BuilderConfig,
}

impl ModelBuilder {
    pub fn new(config: BuilderConfig) -> Self {
        Self { config }
    }

    /// Create one node per input node
    pub fn build_nodes<S: ModelSession>(&self, nodes: &[Node], session: &mut S) -> BuildResult<usize> {
        let convention = &self.config.axis_convention;
        for node in nodes {
            session.submit(ModelCommand::CreateNode {
                no: node.number,
                x: node.x,
                y: node.y,
                z: convention.node_z(node.z),
            })?;
        }
        log::info!("Created {} nodes", nodes.len());
        Ok(nodes.len())
    }

    /// Create one section per distinct cross-section name, in first-seen order
    pub fn build_sections<S: ModelSession>(
        &self,
        elements: &[FrameElement],
        session: &mut S,
    ) -> BuildResult<SectionRegistry> {
        let mut registry = SectionRegistry::new();
        for element in elements {
            if let Some(section) = registry.register(element.section_name(), &self.config.section_catalog) {
                log::debug!("Section {} '{}' -> '{}'", section.no, section.name, section.label);
                session.submit(ModelCommand::CreateSection {
                    no: section.no,
                    name: section.label.clone(),
                    comment: section.name.clone(),
                })?;
            }
        }
        log::info!("Created {} sections from {} frame elements", registry.len(), elements.len());
        Ok(registry)
    }

    /// Create members, cables for guy wires and two-node members otherwise.
    ///
    /// Returns the number of (members, cable members) created.
    pub fn build_members<S: ModelSession>(
        &self,
        elements: &[FrameElement],
        registry: &SectionRegistry,
        session: &mut S,
    ) -> BuildResult<(usize, usize)> {
        let mut members = 0;
        let mut cables = 0;
        for element in elements {
            let section = registry
                .get(element.section_name())
                .ok_or_else(|| BuildError::SectionNotFound(element.section_name().to_string()))?;

            let command = if element.member_type.is_cable() {
                cables += 1;
                ModelCommand::CreateCableMember {
                    no: element.member_number,
                    start_node: element.start_node.number,
                    end_node: element.end_node.number,
                    section,
                }
            } else {
                members += 1;
                ModelCommand::CreateMember {
                    no: element.member_number,
                    start_node: element.start_node.number,
                    end_node: element.end_node.number,
                    rotation_angle: 0.0,
                    start_section: section,
                    end_section: section,
                }
            };
            session.submit(command)?;
        }
        log::info!("Created {} members and {} cable members", members, cables);
        Ok((members, cables))
    }

    /// Create one nodal support per support record, named after its node
    pub fn build_supports<S: ModelSession>(&self, supports: &[Support], session: &mut S) -> BuildResult<usize> {
        for support in supports {
            session.submit(ModelCommand::CreateNodalSupport {
                no: support.node.number,
                nodes: support.name(),
                support_type: self.config.support_type,
            })?;
        }
        log::info!("Created {} {:?} supports", supports.len(), self.config.support_type);
        Ok(supports.len())
    }

    /// Create load cases with their nodal loads and imposed deformations.
    ///
    /// The counter is threaded through the cases, or restarted per case
    /// when the configuration says so.
    pub fn build_load_cases<S: ModelSession>(
        &self,
        cases: &[LoadCase],
        displacements: &[PredefinedNodeDisplacement],
        counter: LoadCounter,
        session: &mut S,
    ) -> BuildResult<LoadCounter> {
        let mut counter = counter;
        for case in cases {
            let self_weight = self.config.axis_convention.self_weight(case.gravitational_constant);
            session.submit(ModelCommand::CreateLoadCase {
                no: case.number,
                name: case.name.clone(),
                self_weight,
            })?;

            if self.config.load_numbering == LoadNumbering::PerLoadCase {
                counter = counter.restart();
            }
            counter = self.build_nodal_loads(&case.nodal_loads, case.number, counter, session)?;
            self.build_predefined_displacements(displacements, case.number, session)?;
        }
        log::info!("Created {} load cases", cases.len());
        Ok(counter)
    }

    /// Create nodal loads with a strictly positive resultant; others are skipped
    /// without consuming a number.
    pub fn build_nodal_loads<S: ModelSession>(
        &self,
        loads: &[NodalLoad],
        load_case: u32,
        counter: LoadCounter,
        session: &mut S,
    ) -> BuildResult<LoadCounter> {
        let mut counter = counter;
        for load in loads {
            if !load.has_force() {
                log::debug!("Skipping zero load at node {} in load case {}", load.node_number, load_case);
                continue;
            }
            let [fx, fy, fz] = self
                .config
                .axis_convention
                .vector(load.force.x, load.force.y, load.force.z);
            let (no, next) = counter.take();
            counter = next;
            session.submit(ModelCommand::CreateNodalLoad {
                no,
                load_case,
                nodes: load.node_number.to_string(),
                components: [fx, fy, fz, 0.0, 0.0, 0.0],
            })?;
        }
        Ok(counter)
    }

    /// Create one imposed deformation per record within a load case
    pub fn build_predefined_displacements<S: ModelSession>(
        &self,
        displacements: &[PredefinedNodeDisplacement],
        load_case: u32,
        session: &mut S,
    ) -> BuildResult<usize> {
        for displacement in displacements {
            session.submit(ModelCommand::CreateImposedNodalDeformation {
                no: displacement.node_number,
                load_case,
                node: displacement.node_number.to_string(),
                parameters: displacement.parameters(&self.config.axis_convention),
            })?;
        }
        Ok(displacements.len())
    }

    /// Run the whole build: open the modification, create every entity,
    /// optionally calculate, and finish the modification.
    pub fn build_model<S: ModelSession>(&self, input: &FeaInput, session: &mut S) -> BuildResult<BuildSummary> {
        if self.config.validate_references {
            validate_document(input)?;
        }
        let tower = input.tower();
        let mut session = CountingSession { inner: session, count: 0 };
        let session = &mut session;

        log::info!("Building model '{}'", self.config.model_name);
        session.submit(ModelCommand::BeginModification {
            model_name: self.config.model_name.clone(),
        })?;
        if let Some(settings) = self.config.base_settings {
            session.submit(ModelCommand::BaseSettings(settings))?;
        }

        let nodes = self.build_nodes(&tower.nodes, session)?;
        session.submit(ModelCommand::CreateMaterial {
            no: self.config.material.no,
            name: self.config.material.name.clone(),
        })?;
        let registry = self.build_sections(&tower.frame_elements, session)?;
        let (members, cable_members) = self.build_members(&tower.frame_elements, &registry, session)?;
        let supports = self.build_supports(&tower.tower_supports, session)?;
        let counter = self.build_load_cases(
            input.load_cases(),
            &tower.predefined_node_displacements,
            LoadCounter::new(),
            session,
        )?;

        let load_cases = input.load_cases().len();
        let total_loads: usize = input.load_cases().iter().map(|c| c.nodal_loads.len()).sum();
        let nodal_loads = counter.issued() as usize;

        let analysis = &self.config.analysis;
        session.submit(ModelCommand::CreateStaticAnalysisSettings {
            no: analysis.no,
            name: analysis.name.clone(),
            kind: analysis.kind,
        })?;
        if self.config.calculate_all {
            session.submit(ModelCommand::CalculateAll)?;
        }
        session.submit(ModelCommand::FinishModification)?;

        let summary = BuildSummary {
            model_name: self.config.model_name.clone(),
            nodes,
            sections: registry.sections().to_vec(),
            members,
            cable_members,
            supports,
            load_cases,
            nodal_loads,
            skipped_loads: total_loads - nodal_loads,
            imposed_deformations: tower.predefined_node_displacements.len() * load_cases,
            commands: session.count,
        };
        log::info!(
            "Model '{}' built with {} commands ({} loads skipped)",
            summary.model_name,
            summary.commands,
            summary.skipped_loads
        );
        Ok(summary)
    }
}

/// Counts commands passing through to the wrapped session
struct CountingSession<'a, S: ModelSession> {
    inner: &'a mut S,
    count: usize,
}

impl<S: ModelSession> ModelSession for CountingSession<'_, S> {
    fn submit(&mut self, command: ModelCommand) -> BuildResult<()> {
        self.inner.submit(command)?;
        self.count += 1;
        Ok(())
    }
}
