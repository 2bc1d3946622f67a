//! List numbering management for DOCX output
//!
//! Every numbering definition becomes one abstract numbering. Each ordered
//! list instance gets its own concrete numbering restarting at 1, so that
//! separate lists sharing `contract-list` do not continue each other.

use std::collections::HashMap;

use docx_rs::*;
use ecow::EcoString;

use crate::document::{MarkerAlignment, NumberingDefinition, NumberingLevel};
use crate::numbering::ListRegistration;

/// List numbering management for DOCX
#[derive(Clone, Debug, Default)]
pub struct DocxNumbering {
    next_id: usize,
    abstract_ids: HashMap<EcoString, usize>,
    /// Concrete numbering of paragraphs without a list instance.
    shared: HashMap<EcoString, usize>,
    /// Concrete numbering of ordered list instances.
    instances: HashMap<(EcoString, u32), usize>,
    /// Left indents of the defined levels.
    indents: HashMap<(EcoString, usize), i32>,
}

impl DocxNumbering {
    /// Create a new numbering manager
    pub fn new() -> Self {
        Self {
            next_id: 1,
            ..Default::default()
        }
    }

    fn allocate(&mut self) -> usize {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Create a list level from its definition
    pub fn create_list_level(def: &NumberingLevel) -> Level {
        let jc = match def.alignment {
            MarkerAlignment::Start => "start",
            MarkerAlignment::Left => "left",
        };

        let level = Level::new(
            def.level,
            Start::new(1),
            NumberFormat::new(def.format.as_str()),
            LevelText::new(def.text.as_str()),
            LevelJc::new(jc),
        );

        match def.indent_left {
            Some(left) => level.indent(
                Some(left),
                def.hanging.map(SpecialIndentType::Hanging),
                None,
                None,
            ),
            None => level,
        }
    }

    /// Register the abstract numbering definitions and list instances
    pub fn initialize_numbering(
        &mut self,
        mut docx: Docx,
        definitions: &[NumberingDefinition],
        lists: &[ListRegistration],
    ) -> Docx {
        for def in definitions {
            let abstract_id = self.allocate();
            let mut abstract_numbering = AbstractNumbering::new(abstract_id);
            for level in &def.levels {
                abstract_numbering = abstract_numbering.add_level(Self::create_list_level(level));
                if let Some(left) = level.indent_left {
                    self.indents
                        .insert((def.reference.clone(), level.level), left);
                }
            }
            self.abstract_ids.insert(def.reference.clone(), abstract_id);

            let numbering_id = self.allocate();
            self.shared.insert(def.reference.clone(), numbering_id);
            docx = docx
                .add_abstract_numbering(abstract_numbering)
                .add_numbering(Numbering::new(numbering_id, abstract_id));
        }

        for list in lists {
            let Some(&abstract_id) = self.abstract_ids.get(&list.reference) else {
                log::warn!("no numbering definition for {:?}", list.reference);
                continue;
            };

            let numbering_id = self.allocate();
            let numbering = Numbering::new(numbering_id, abstract_id)
                .add_override(LevelOverride::new(0).start(1));
            self.instances
                .insert((list.reference.clone(), list.instance), numbering_id);
            docx = docx.add_numbering(numbering);
        }

        docx
    }

    /// Find the concrete numbering of a list paragraph
    pub fn numbering_id(&self, reference: &str, instance: Option<u32>) -> Option<usize> {
        match instance {
            Some(instance) => self
                .instances
                .get(&(EcoString::from(reference), instance))
                .copied(),
            None => self.shared.get(reference).copied(),
        }
    }

    /// The left indent of a numbering level, if the definition sets one
    pub fn level_indent(&self, reference: &str, level: usize) -> Option<i32> {
        self.indents
            .get(&(EcoString::from(reference), level))
            .copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::numbering::{CONTRACT_LIST, DASH_BULLETS};

    fn contract_list(instance: u32) -> ListRegistration {
        ListRegistration {
            reference: CONTRACT_LIST.into(),
            instance,
        }
    }

    #[test]
    fn each_instance_restarts() {
        let definitions = [
            NumberingDefinition::contract_list(),
            NumberingDefinition::dash_bullets(),
        ];
        let mut numbering = DocxNumbering::new();
        let _ = numbering.initialize_numbering(
            Docx::new(),
            &definitions,
            &[contract_list(1), contract_list(2)],
        );

        let first = numbering.numbering_id(CONTRACT_LIST, Some(1));
        let second = numbering.numbering_id(CONTRACT_LIST, Some(2));
        assert!(first.is_some());
        assert_ne!(first, second);
        assert!(numbering.numbering_id(DASH_BULLETS, None).is_some());
        assert_eq!(numbering.numbering_id(CONTRACT_LIST, Some(3)), None);
    }

    #[test]
    fn level_indents() {
        let mut numbering = DocxNumbering::new();
        let _ = numbering.initialize_numbering(
            Docx::new(),
            &[
                NumberingDefinition::contract_list(),
                NumberingDefinition::dash_bullets(),
            ],
            &[],
        );

        assert_eq!(numbering.level_indent(CONTRACT_LIST, 0), Some(720));
        assert_eq!(numbering.level_indent(CONTRACT_LIST, 1), None);
        assert_eq!(numbering.level_indent(DASH_BULLETS, 0), Some(709));
    }
}
