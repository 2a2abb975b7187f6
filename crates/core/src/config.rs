//! Generator configuration.
//!
//! Every option has a default, so an empty configuration file is valid.
//! Values are spelled the same way in configuration files and on the command
//! line (see the `FromStr` impls).

use std::str::FromStr;

use serde::Deserialize;

use crate::error::ConfigError;

/// Effective configuration for one generation pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct Config {
    /// How `format: date` / `format: date-time` strings are typed.
    pub date_type: DateType,
    /// How enumerations are declared.
    pub enum_type: EnumStyle,
    /// How property names are written in generated declarations.
    pub property_name_style: PropertyNameStyle,
    /// Which bottom value marks a nullable type.
    pub nullable_type: NullableType,
    /// Suffix appended to generated client class names.
    pub client_suffix: ClientSuffix,
    /// How client method names are derived.
    pub method_name_style: MethodNameStyle,
}

/// Rendering of date and date-time strings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub enum DateType {
    /// Keep them as `string`.
    #[default]
    #[serde(rename = "string")]
    String,
    /// Use the `Date` object type.
    #[serde(rename = "Date", alias = "date")]
    Date,
}

/// Representation of enumeration declarations.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EnumStyle {
    /// `export const X = { ... } as const;` plus a derived type.
    #[default]
    ConstObject,
    /// `export type X = 'a' | 'b';`
    Union,
    /// `export enum X { ... }`
    Enum,
}

/// Property naming transform.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PropertyNameStyle {
    /// Keep names exactly as written in the document.
    #[default]
    Original,
    /// Convert to camelCase.
    CamelCase,
}

/// Bottom value used for nullable types.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum NullableType {
    /// `T | null`
    #[default]
    Null,
    /// `T | undefined`
    Undefined,
}

/// Client class name suffix.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub enum ClientSuffix {
    /// `PetsClient`
    #[default]
    Client,
    /// `PetsApi`
    Api,
}

/// Client method naming. Only operationId-based naming exists today.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MethodNameStyle {
    /// Use the (sanitized) `operationId`.
    #[default]
    OperationId,
}

impl ClientSuffix {
    pub fn as_str(self) -> &'static str {
        match self {
            ClientSuffix::Client => "Client",
            ClientSuffix::Api => "Api",
        }
    }
}

impl FromStr for DateType {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "string" => Ok(DateType::String),
            "Date" | "date" => Ok(DateType::Date),
            _ => Err(invalid("dateType", s, "string, Date")),
        }
    }
}

impl FromStr for EnumStyle {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "constObject" => Ok(EnumStyle::ConstObject),
            "union" => Ok(EnumStyle::Union),
            "enum" => Ok(EnumStyle::Enum),
            _ => Err(invalid("enumType", s, "constObject, union, enum")),
        }
    }
}

impl FromStr for PropertyNameStyle {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "original" => Ok(PropertyNameStyle::Original),
            "camelCase" => Ok(PropertyNameStyle::CamelCase),
            _ => Err(invalid("propertyNameStyle", s, "original, camelCase")),
        }
    }
}

impl FromStr for NullableType {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "null" => Ok(NullableType::Null),
            "undefined" => Ok(NullableType::Undefined),
            _ => Err(invalid("nullableType", s, "null, undefined")),
        }
    }
}

impl FromStr for ClientSuffix {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Client" => Ok(ClientSuffix::Client),
            "Api" => Ok(ClientSuffix::Api),
            _ => Err(invalid("clientSuffix", s, "Client, Api")),
        }
    }
}

impl FromStr for MethodNameStyle {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "operationId" => Ok(MethodNameStyle::OperationId),
            _ => Err(invalid("methodNameStyle", s, "operationId")),
        }
    }
}

fn invalid(option: &'static str, value: &str, expected: &'static str) -> ConfigError {
    ConfigError {
        option,
        value: value.to_string(),
        expected,
    }
}
