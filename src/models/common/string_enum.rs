/// 定义以 snake_case 字符串存储的枚举
///
/// 自动生成：
/// - 变体对应的字符串常量与 `as_str()`
/// - 校验型 Deserialize（错误信息列出所有可选值）
/// - Display / FromStr
#[macro_export]
macro_rules! define_string_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident ($label:literal) {
            $($variant:ident = $value:literal),* $(,)?
        }
    ) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ::serde::Serialize, ::ts_rs::TS)]
        #[serde(rename_all = "snake_case")]
        $(#[$meta])*
        $vis enum $name {
            $($variant,)*
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant,)*];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $value,)*
                }
            }
        }

        impl<'de> ::serde::Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: ::serde::Deserializer<'de>,
            {
                let s = <String as ::serde::Deserialize>::deserialize(deserializer)?;
                s.parse::<$name>().map_err(|_| {
                    <D::Error as ::serde::de::Error>::custom(format!(
                        "无效的{}: '{}'. 支持的值: {}",
                        $label,
                        s,
                        [$($value),*].join(", ")
                    ))
                })
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($value => Ok($name::$variant),)*
                    _ => Err(format!("Invalid {}: {s}", stringify!($name))),
                }
            }
        }
    };
}

#[cfg(test)]
mod tests {
    crate::define_string_enum! {
        enum Fruit ("水果") {
            Apple = "apple",
            BlueBerry = "blue_berry",
        }
    }

    #[test]
    fn test_round_trip_strings() {
        assert_eq!("blue_berry".parse::<Fruit>(), Ok(Fruit::BlueBerry));
        assert_eq!(Fruit::Apple.to_string(), "apple");
        assert_eq!(serde_json::to_string(&Fruit::BlueBerry).unwrap(), "\"blue_berry\"");
        assert_eq!(Fruit::ALL.len(), 2);
    }

    #[test]
    fn test_invalid_value_lists_choices() {
        let err = serde_json::from_str::<Fruit>("\"pear\"").unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("pear"));
        assert!(msg.contains("apple, blue_berry"));
    }
}
