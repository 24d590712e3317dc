//! Synthetic wrapper structs for service functions.
//!
//! Every function gets an argument struct `<Service>_<function>_args`
//! holding its parameters. Unless the function is oneway it also gets a
//! result struct `<Service>_<function>_result`: field 0 `success` for
//! non-void returns, then one optional field per declared exception.
//! They are built on demand and dropped by the emitter that asked.

use thriftgen_ast::{Field, Function, Requiredness, Service, Struct};

/// Name of the result field carrying a function's return value.
pub const SUCCESS_FIELD: &str = "success";

pub fn args_struct_name(service: &str, function: &str) -> String {
    format!("{}_{}_args", service, function)
}

pub fn result_struct_name(service: &str, function: &str) -> String {
    format!("{}_{}_result", service, function)
}

/// The struct wrapping a call's arguments.
pub fn args_struct(service: &Service, function: &Function) -> Struct {
    Struct {
        fields: function.arguments.clone(),
        ..Struct::new(args_struct_name(&service.name, &function.name))
    }
}

/// The struct wrapping a call's reply. `None` for oneway functions.
pub fn result_struct(service: &Service, function: &Function) -> Option<Struct> {
    if function.oneway {
        return None;
    }

    let mut result = Struct::new(result_struct_name(&service.name, &function.name));
    if !function.returns.is_void() {
        result
            .fields
            .push(Field::new(0, SUCCESS_FIELD, function.returns.clone()).optional());
    }
    result.fields.extend(function.exceptions.iter().map(|ex| Field {
        requiredness: Requiredness::Optional,
        ..ex.clone()
    }));
    Some(result)
}

#[cfg(test)]
mod tests {
    use thriftgen_ast::Type;

    use super::*;

    fn calculator() -> Service {
        Service::new("Calculator")
            .function(
                Function::new("calculate", Type::I32)
                    .arg(Field::new(1, "logid", Type::I32))
                    .arg(Field::new(2, "w", Type::struct_("Work")))
                    .throws(Field::new(1, "ouch", Type::exception("InvalidOperation"))),
            )
            .function(Function::new("ping", Type::Void))
            .function(Function::new("zip", Type::Void).oneway())
    }

    #[test]
    fn test_args_struct() {
        let service = calculator();
        let args = args_struct(&service, &service.functions[0]);
        assert_eq!(args.name, "Calculator_calculate_args");
        assert_eq!(args.fields.len(), 2);
        assert!(!args.is_exception);
    }

    #[test]
    fn test_result_struct_fields() {
        let service = calculator();
        let result = result_struct(&service, &service.functions[0]).unwrap();

        assert_eq!(result.name, "Calculator_calculate_result");
        let keys: Vec<(i16, &str)> = result
            .fields
            .iter()
            .map(|f| (f.key, f.name.as_str()))
            .collect();
        assert_eq!(keys, vec![(0, "success"), (1, "ouch")]);
        assert!(result.fields.iter().all(|f| f.requiredness.is_optional()));
    }

    #[test]
    fn test_void_result_has_no_success() {
        let service = calculator();
        let result = result_struct(&service, &service.functions[1]).unwrap();
        assert!(result.fields.is_empty());
    }

    #[test]
    fn test_oneway_has_no_result() {
        let service = calculator();
        assert!(result_struct(&service, &service.functions[2]).is_none());
    }
}
