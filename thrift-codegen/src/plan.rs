//! Reader and writer plans for struct serialization.
//!
//! Backends emit `read`/`write` methods from these plans instead of
//! re-deriving wire order, presence checks and the reader loop's
//! dispatch rules on their own. The plans can also be executed against a
//! sequence of field headers, which is how the read/write pairing is
//! tested without a wire protocol.

use thriftgen_ast::{Field, Requiredness, Struct};

use crate::classify::{Category, WireType, classify, wire_type};

/// A field header as read from the wire: field id and wire type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldHeader {
    pub id: i16,
    pub wire: WireType,
}

impl FieldHeader {
    /// The STOP marker that ends a struct.
    pub const STOP: FieldHeader = FieldHeader {
        id: 0,
        wire: WireType::Stop,
    };

    pub fn new(id: i16, wire: WireType) -> Self {
        Self { id, wire }
    }

    pub fn is_stop(&self) -> bool {
        self.wire == WireType::Stop
    }
}

/// What the reader does with fields whose id is not declared.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum UnknownFields {
    /// Consume and discard with the protocol's skip primitive.
    #[default]
    Skip,
    /// Report an error.
    Reject,
}

impl UnknownFields {
    pub fn from_strict(strict: bool) -> Self {
        if strict { Self::Reject } else { Self::Skip }
    }
}

/// States of the generated reader loop.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ReaderState<'a> {
    AwaitFieldHeader,
    DecodeKnownField(&'a Field),
    /// Unknown id, or a known id with a mismatched wire type.
    SkipUnknownField(FieldHeader),
    /// Unknown id while unknown fields are rejected.
    RejectUnknownField(FieldHeader),
    Done,
}

/// A declared field as the reader sees it.
#[derive(Debug, Clone, Copy)]
pub struct ReadField<'a> {
    pub field: &'a Field,
    pub wire: WireType,
}

impl ReadField<'_> {
    pub fn is_required(&self) -> bool {
        self.field.requiredness.is_required()
    }
}

/// Reader plan for one struct.
#[derive(Debug, Clone)]
pub struct ReadPlan<'a> {
    name: &'a str,
    fields: Vec<ReadField<'a>>,
    unknown: UnknownFields,
}

impl<'a> ReadPlan<'a> {
    pub fn new(def: &'a Struct, unknown: UnknownFields) -> Self {
        let fields = def
            .sorted_fields()
            .into_iter()
            .map(|field| ReadField {
                field,
                wire: wire_type(&field.ty),
            })
            .collect();

        Self {
            name: &def.name,
            fields,
            unknown,
        }
    }

    pub fn struct_name(&self) -> &'a str {
        self.name
    }

    /// Declared fields in wire order.
    pub fn fields(&self) -> &[ReadField<'a>] {
        &self.fields
    }

    pub fn unknown_fields(&self) -> UnknownFields {
        self.unknown
    }

    /// Fields whose presence is checked after the loop.
    pub fn required(&self) -> impl Iterator<Item = &'a Field> + '_ {
        self.fields
            .iter()
            .filter(|f| f.is_required())
            .map(|f| f.field)
    }

    pub fn has_required(&self) -> bool {
        self.fields.iter().any(ReadField::is_required)
    }

    /// One transition out of `AwaitFieldHeader`.
    pub fn step(&self, header: FieldHeader) -> ReaderState<'a> {
        if header.is_stop() {
            return ReaderState::Done;
        }

        match self.fields.iter().find(|f| f.field.key == header.id) {
            Some(known) if known.wire == header.wire => ReaderState::DecodeKnownField(known.field),
            Some(_) => ReaderState::SkipUnknownField(header),
            None => match self.unknown {
                UnknownFields::Skip => ReaderState::SkipUnknownField(header),
                UnknownFields::Reject => ReaderState::RejectUnknownField(header),
            },
        }
    }

    /// Run the reader loop over `headers`. Running out of headers acts as
    /// STOP.
    pub fn replay(&self, headers: impl IntoIterator<Item = FieldHeader>) -> ReadOutcome<'a> {
        let mut outcome = ReadOutcome::default();

        for header in headers {
            match self.step(header) {
                ReaderState::Done => break,
                ReaderState::DecodeKnownField(field) => {
                    if !outcome.decoded.iter().any(|f| f.key == field.key) {
                        outcome.decoded.push(field);
                    }
                }
                ReaderState::SkipUnknownField(header) => outcome.skipped.push(header),
                ReaderState::RejectUnknownField(header) => {
                    outcome.rejected = Some(header);
                    return outcome;
                }
                ReaderState::AwaitFieldHeader => {}
            }
        }

        outcome.missing = self
            .required()
            .filter(|req| !outcome.decoded.iter().any(|f| f.key == req.key))
            .collect();
        outcome
    }
}

/// Result of replaying the reader loop.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReadOutcome<'a> {
    pub decoded: Vec<&'a Field>,
    pub skipped: Vec<FieldHeader>,
    pub rejected: Option<FieldHeader>,
    pub missing: Vec<&'a Field>,
}

impl ReadOutcome<'_> {
    pub fn is_valid(&self) -> bool {
        self.rejected.is_none() && self.missing.is_empty()
    }

    pub fn missing_names(&self) -> Vec<&str> {
        self.missing.iter().map(|f| f.name.as_str()).collect()
    }
}

/// When the writer emits a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presence {
    /// Unconditionally.
    Always,
    /// Only when the field holds a value.
    IfSet,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum WriteMode {
    /// Every field in wire order, each behind its own presence check.
    #[default]
    Sequential,
    /// At most one field: an if / else-if chain over all fields. Used for
    /// function results.
    Exclusive,
}

#[derive(Debug, Clone, Copy)]
pub struct WriteField<'a> {
    pub field: &'a Field,
    pub wire: WireType,
    pub presence: Presence,
}

/// Writer plan for one struct.
#[derive(Debug, Clone)]
pub struct WritePlan<'a> {
    name: &'a str,
    fields: Vec<WriteField<'a>>,
    mode: WriteMode,
}

impl<'a> WritePlan<'a> {
    pub fn new(def: &'a Struct, mode: WriteMode) -> Self {
        let guard_all = def.is_union || mode == WriteMode::Exclusive;
        let fields = def
            .sorted_fields()
            .into_iter()
            .map(|field| WriteField {
                field,
                wire: wire_type(&field.ty),
                presence: if guard_all {
                    Presence::IfSet
                } else {
                    presence(field)
                },
            })
            .collect();

        Self {
            name: &def.name,
            fields,
            mode,
        }
    }

    pub fn struct_name(&self) -> &'a str {
        self.name
    }

    pub fn fields(&self) -> &[WriteField<'a>] {
        &self.fields
    }

    pub fn mode(&self) -> WriteMode {
        self.mode
    }

    /// Field headers the generated writer emits when exactly the fields
    /// with ids in `set` hold values, ending with STOP.
    pub fn headers_for(&self, set: &[i16]) -> Vec<FieldHeader> {
        let is_set = |f: &WriteField<'_>| set.contains(&f.field.key);
        let mut headers: Vec<FieldHeader> = match self.mode {
            WriteMode::Sequential => self
                .fields
                .iter()
                .filter(|f| f.presence == Presence::Always || is_set(f))
                .map(|f| FieldHeader::new(f.field.key, f.wire))
                .collect(),
            WriteMode::Exclusive => self
                .fields
                .iter()
                .find(|f| is_set(f))
                .map(|f| FieldHeader::new(f.field.key, f.wire))
                .into_iter()
                .collect(),
        };
        headers.push(FieldHeader::STOP);
        headers
    }
}

/// Presence check for a field of a plain struct.
///
/// Fields without a requiredness keyword are written unconditionally when
/// their type has a zero value; reference-like types may be unset.
pub fn presence(field: &Field) -> Presence {
    match field.requiredness {
        Requiredness::Required => Presence::Always,
        Requiredness::Optional => Presence::IfSet,
        Requiredness::OptInReqOut => match classify(&field.ty) {
            Category::Base(base) if base != thriftgen_ast::BaseType::Binary => Presence::Always,
            Category::Enum(_) => Presence::Always,
            _ => Presence::IfSet,
        },
    }
}

#[cfg(test)]
mod tests {
    use thriftgen_ast::Type;

    use super::*;

    fn point() -> Struct {
        Struct::new("Point")
            .field(Field::new(1, "x", Type::I32).required())
            .field(Field::new(2, "y", Type::I32).required())
    }

    fn work() -> Struct {
        Struct::new("Work")
            .field(Field::new(4, "comment", Type::string()).optional())
            .field(Field::new(1, "num1", Type::I32))
            .field(Field::new(3, "op", Type::enum_("Operation")).required())
            .field(Field::new(2, "num2", Type::I32))
    }

    #[test]
    fn test_point_missing_y() {
        let def = point();
        let plan = ReadPlan::new(&def, UnknownFields::Skip);
        let outcome = plan.replay([FieldHeader::new(1, WireType::I32), FieldHeader::STOP]);

        assert_eq!(outcome.decoded.len(), 1);
        assert_eq!(outcome.missing_names(), vec!["y"]);
        assert!(!outcome.is_valid());
    }

    #[test]
    fn test_point_nothing_read() {
        let def = point();
        let plan = ReadPlan::new(&def, UnknownFields::Skip);
        let outcome = plan.replay([FieldHeader::STOP]);
        assert_eq!(outcome.missing_names(), vec!["x", "y"]);
    }

    #[test]
    fn test_step_transitions() {
        let def = point();
        let plan = ReadPlan::new(&def, UnknownFields::Skip);

        assert_eq!(plan.step(FieldHeader::STOP), ReaderState::Done);
        assert!(matches!(
            plan.step(FieldHeader::new(2, WireType::I32)),
            ReaderState::DecodeKnownField(f) if f.name == "y"
        ));
        let mismatched = FieldHeader::new(2, WireType::String);
        assert_eq!(plan.step(mismatched), ReaderState::SkipUnknownField(mismatched));
        let unknown = FieldHeader::new(9, WireType::I64);
        assert_eq!(plan.step(unknown), ReaderState::SkipUnknownField(unknown));
    }

    #[test]
    fn test_strict_rejects_unknown_ids_only() {
        let def = point();
        let plan = ReadPlan::new(&def, UnknownFields::from_strict(true));

        let unknown = FieldHeader::new(9, WireType::I64);
        assert_eq!(plan.step(unknown), ReaderState::RejectUnknownField(unknown));
        let mismatched = FieldHeader::new(1, WireType::Double);
        assert_eq!(plan.step(mismatched), ReaderState::SkipUnknownField(mismatched));

        let outcome = plan.replay([FieldHeader::new(1, WireType::I32), unknown]);
        assert_eq!(outcome.rejected, Some(unknown));
        assert!(!outcome.is_valid());
    }

    #[test]
    fn test_write_plan_wire_order_and_presence() {
        let def = work();
        let plan = WritePlan::new(&def, WriteMode::Sequential);
        let keys: Vec<i16> = plan.fields().iter().map(|f| f.field.key).collect();
        assert_eq!(keys, vec![1, 2, 3, 4]);

        let presence: Vec<Presence> = plan.fields().iter().map(|f| f.presence).collect();
        assert_eq!(
            presence,
            vec![
                Presence::Always,
                Presence::Always,
                Presence::Always,
                Presence::IfSet
            ]
        );
    }

    #[test]
    fn test_default_requiredness_reference_types_are_guarded() {
        let field = Field::new(1, "tags", Type::list(Type::string()));
        assert_eq!(presence(&field), Presence::IfSet);
        let field = Field::new(2, "blob", Type::binary());
        assert_eq!(presence(&field), Presence::IfSet);
    }

    #[test]
    fn test_write_then_read_round_trip() {
        let def = work();
        let writer = WritePlan::new(&def, WriteMode::Sequential);
        let reader = ReadPlan::new(&def, UnknownFields::Reject);

        for set in [&[][..], &[4], &[1, 4], &[1, 2, 3, 4]] {
            let outcome = reader.replay(writer.headers_for(set));
            assert!(outcome.is_valid(), "set {:?}: {:?}", set, outcome);

            let decoded: Vec<i16> = outcome.decoded.iter().map(|f| f.key).collect();
            assert!(decoded.contains(&3), "required field lost for {:?}", set);
            assert_eq!(decoded.contains(&4), set.contains(&4));
        }
    }

    #[test]
    fn test_exclusive_writes_first_set_field_only() {
        let result = Struct::new("Calculator_calculate_result")
            .field(Field::new(0, "success", Type::I32).optional())
            .field(Field::new(1, "ouch", Type::exception("InvalidOperation")).optional());
        let plan = WritePlan::new(&result, WriteMode::Exclusive);

        assert!(plan.fields().iter().all(|f| f.presence == Presence::IfSet));
        assert_eq!(
            plan.headers_for(&[0, 1]),
            vec![FieldHeader::new(0, WireType::I32), FieldHeader::STOP]
        );
        assert_eq!(
            plan.headers_for(&[1]),
            vec![FieldHeader::new(1, WireType::Struct), FieldHeader::STOP]
        );
        assert_eq!(plan.headers_for(&[]), vec![FieldHeader::STOP]);
    }

    #[test]
    fn test_union_fields_are_guarded() {
        let def = Struct::union("Value")
            .field(Field::new(1, "i", Type::I64))
            .field(Field::new(2, "s", Type::string()));
        let plan = WritePlan::new(&def, WriteMode::Sequential);
        assert!(plan.fields().iter().all(|f| f.presence == Presence::IfSet));
    }
}
