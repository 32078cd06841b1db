use crate::scoring::{counts_from_raw, Counts, ScoringEngine};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Item,
    Card,
    /// Color bonus toggle; state lives in the engine, not in the form
    Bonus,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub key: String,
    pub label: String,
    pub kind: FieldKind,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormTarget {
    House(usize),
    Color(String),
}

/// Edit popup state: a list of numeric fields (and, for a color, bonus
/// toggles) with one selected row.
#[derive(Debug, Clone)]
pub struct EditForm {
    pub target: FormTarget,
    pub fields: Vec<Field>,
    pub selected: usize,
}

impl EditForm {
    /// House editor prefilled with the house's current counts
    pub fn for_house(engine: &ScoringEngine, index: usize) -> Option<Self> {
        let house = engine.house(index)?;
        let catalog = engine.catalog();

        let items = catalog.items().iter().map(|item| Field {
            key: item.key.clone(),
            label: item.label.clone(),
            kind: FieldKind::Item,
            value: house.item_count(&item.key).to_string(),
        });
        let cards = catalog.cards().iter().map(|card| Field {
            key: card.key.clone(),
            label: card.label.clone(),
            kind: FieldKind::Card,
            value: house.card_count(&card.key).to_string(),
        });

        Some(Self {
            target: FormTarget::House(index),
            fields: items.chain(cards).collect(),
            selected: 0,
        })
    }

    /// Color editor: one delta per item starting at 0, then one bonus toggle per item
    pub fn for_color(engine: &ScoringEngine, color: &str) -> Self {
        let items = engine.catalog().items();

        let deltas = items.iter().map(|item| Field {
            key: item.key.clone(),
            label: format!("+{}", item.label),
            kind: FieldKind::Item,
            value: "0".to_string(),
        });
        let toggles = items.iter().map(|item| Field {
            key: item.key.clone(),
            label: format!("{} bonus", item.label),
            kind: FieldKind::Bonus,
            value: String::new(),
        });

        Self {
            target: FormTarget::Color(color.to_string()),
            fields: deltas.chain(toggles).collect(),
            selected: 0,
        }
    }

    pub fn title(&self, engine: &ScoringEngine) -> String {
        match &self.target {
            FormTarget::House(index) => engine
                .house(*index)
                .map(|h| format!(" Edit {} ", h.name()))
                .unwrap_or_else(|| " Edit house ".to_string()),
            FormTarget::Color(color) => format!(" All {} houses ", color),
        }
    }

    pub fn selected_field(&self) -> Option<&Field> {
        self.fields.get(self.selected)
    }

    pub fn on_toggle_row(&self) -> bool {
        matches!(self.selected_field(), Some(f) if f.kind == FieldKind::Bonus)
    }

    pub fn next(&mut self) {
        if !self.fields.is_empty() {
            self.selected = (self.selected + 1) % self.fields.len();
        }
    }

    pub fn previous(&mut self) {
        if !self.fields.is_empty() {
            self.selected = (self.selected + self.fields.len() - 1) % self.fields.len();
        }
    }

    /// Type into the selected numeric field. Only digits and `-` are taken;
    /// a lone "0" is replaced rather than extended.
    pub fn push_char(&mut self, c: char) {
        if !(c.is_ascii_digit() || c == '-') {
            return;
        }
        if let Some(field) = self.fields.get_mut(self.selected) {
            if field.kind == FieldKind::Bonus {
                return;
            }
            if field.value == "0" {
                field.value.clear();
            }
            field.value.push(c);
        }
    }

    pub fn backspace(&mut self) {
        if let Some(field) = self.fields.get_mut(self.selected) {
            field.value.pop();
        }
    }

    fn counts_of(&self, kind: FieldKind) -> Counts {
        let fields: Vec<&Field> = self.fields.iter().filter(|f| f.kind == kind).collect();
        counts_from_raw(fields.iter().map(|f| f.key.as_str()), |key| {
            fields
                .iter()
                .find(|f| f.key == key)
                .map(|f| f.value.clone())
        })
    }

    /// Clamped item values
    pub fn item_counts(&self) -> Counts {
        self.counts_of(FieldKind::Item)
    }

    /// Clamped card values
    pub fn card_counts(&self) -> Counts {
        self.counts_of(FieldKind::Card)
    }
}
