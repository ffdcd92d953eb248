//! PostgreSQL Type OID Constants
//!
//! Reference: https://github.com/postgres/postgres/blob/master/src/include/catalog/pg_type.dat
//!
//! Only the scalar types below have built-in transcoders. The remaining
//! constants exist so that lookup misses and listings can name the type.

/// Server type identifier, as issued by `pg_type`.
pub type Oid = u32;

/// PostgreSQL Type OIDs
pub mod oid {
    use super::Oid;

    // Boolean
    pub const BOOL: Oid = 16;

    // Bytes
    pub const BYTEA: Oid = 17;

    // Characters
    pub const NAME: Oid = 19;

    // Integers
    pub const INT8: Oid = 20; // bigint
    pub const INT2: Oid = 21; // smallint
    pub const INT4: Oid = 23; // integer

    // Text
    pub const TEXT: Oid = 25;
    pub const VARCHAR: Oid = 1043;
    pub const BPCHAR: Oid = 1042; // blank-padded char

    // OID
    pub const OID: Oid = 26;

    // JSON
    pub const JSON: Oid = 114;
    pub const JSONB: Oid = 3802;

    // Float
    pub const FLOAT4: Oid = 700;
    pub const FLOAT8: Oid = 701;

    // Numeric
    pub const NUMERIC: Oid = 1700;

    // Date/Time
    pub const DATE: Oid = 1082;
    pub const TIMESTAMP: Oid = 1114;
    pub const TIMESTAMPTZ: Oid = 1184;

    // UUID
    pub const UUID: Oid = 2950;
}

/// Map OID to a human-readable type name.
pub fn oid_to_name(oid: Oid) -> Option<&'static str> {
    let name = match oid {
        oid::BOOL => "bool",
        oid::BYTEA => "bytea",
        oid::NAME => "name",
        oid::INT8 => "int8",
        oid::INT2 => "int2",
        oid::INT4 => "int4",
        oid::TEXT => "text",
        oid::VARCHAR => "varchar",
        oid::BPCHAR => "bpchar",
        oid::OID => "oid",
        oid::JSON => "json",
        oid::JSONB => "jsonb",
        oid::FLOAT4 => "float4",
        oid::FLOAT8 => "float8",
        oid::NUMERIC => "numeric",
        oid::DATE => "date",
        oid::TIMESTAMP => "timestamp",
        oid::TIMESTAMPTZ => "timestamptz",
        oid::UUID => "uuid",
        _ => return None,
    };
    Some(name)
}

/// Resolve a type name (or a common SQL alias) to its OID.
pub fn name_to_oid(name: &str) -> Option<Oid> {
    let oid = match name.to_ascii_lowercase().as_str() {
        "bool" | "boolean" => oid::BOOL,
        "bytea" => oid::BYTEA,
        "name" => oid::NAME,
        "int8" | "bigint" => oid::INT8,
        "int2" | "smallint" => oid::INT2,
        "int4" | "int" | "integer" => oid::INT4,
        "text" => oid::TEXT,
        "varchar" | "character varying" => oid::VARCHAR,
        "bpchar" | "char" | "character" => oid::BPCHAR,
        "oid" => oid::OID,
        "json" => oid::JSON,
        "jsonb" => oid::JSONB,
        "float4" | "real" => oid::FLOAT4,
        "float8" | "double precision" => oid::FLOAT8,
        "numeric" | "decimal" => oid::NUMERIC,
        "date" => oid::DATE,
        "timestamp" => oid::TIMESTAMP,
        "timestamptz" => oid::TIMESTAMPTZ,
        "uuid" => oid::UUID,
        _ => return None,
    };
    Some(oid)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_oid_to_name() {
        assert_eq!(oid_to_name(oid::INT4), Some("int4"));
        assert_eq!(oid_to_name(oid::FLOAT8), Some("float8"));
        assert_eq!(oid_to_name(oid::UUID), Some("uuid"));
        assert_eq!(oid_to_name(9999), None);
    }

    #[test]
    fn test_name_to_oid_aliases() {
        assert_eq!(name_to_oid("int4"), Some(23));
        assert_eq!(name_to_oid("INTEGER"), Some(23));
        assert_eq!(name_to_oid("double precision"), Some(701));
        assert_eq!(name_to_oid("boolean"), Some(16));
        assert_eq!(name_to_oid("geometry"), None);
    }

    #[test]
    fn test_names_round_trip() {
        for oid in [16, 20, 21, 23, 25, 26, 700, 701, 1043] {
            let name = oid_to_name(oid).unwrap();
            assert_eq!(name_to_oid(name), Some(oid));
        }
    }
}
