//! 组件构造相关的宏定义
//!
//! 提供从配置类型到组件、从组件到 trait object 的 From 实现

/// 为配置类型自动实现 From trait
///
/// 支持两种模式：
/// 1. `impl_from!(ConfigType => Type)` - 调用 Type::new(config)
/// 2. `impl_from!(ConfigType => Type, field: config)` - 使用 Self { config }
#[macro_export]
macro_rules! impl_from {
    ($config_type:ty => $target_type:ty) => {
        impl From<$config_type> for $target_type {
            fn from(config: $config_type) -> Self {
                <$target_type>::new(config)
            }
        }
    };

    ($config_type:ty => $target_type:ty, field: $field:ident) => {
        impl From<$config_type> for $target_type {
            fn from($field: $config_type) -> Self {
                Self { $field }
            }
        }
    };
}

/// 为 Box<T> 类型自动实现到 Box<dyn Trait> 的转换
///
/// 用法：`impl_box_from!(Type => dyn TraitName)`
#[macro_export]
macro_rules! impl_box_from {
    ($source_type:ty => dyn $trait_name:path) => {
        impl From<Box<$source_type>> for Box<dyn $trait_name> {
            fn from(source: Box<$source_type>) -> Self {
                source as Box<dyn $trait_name>
            }
        }
    };
}

#[cfg(test)]
mod tests {
    #[derive(Debug)]
    struct SinkConfig {
        name: String,
    }

    struct NamedSink {
        config: SinkConfig,
    }

    impl NamedSink {
        fn new(config: SinkConfig) -> Self {
            Self { config }
        }
    }

    struct FieldSink {
        config: SinkConfig,
    }

    trait Named {
        fn name(&self) -> &str;
    }

    impl Named for NamedSink {
        fn name(&self) -> &str {
            &self.config.name
        }
    }

    impl_from!(SinkConfig => NamedSink);
    impl_from!(SinkConfig => FieldSink, field: config);
    impl_box_from!(NamedSink => dyn Named);

    #[test]
    fn test_impl_from_new() {
        let sink = NamedSink::from(SinkConfig {
            name: "console".to_string(),
        });
        assert_eq!(sink.config.name, "console");
    }

    #[test]
    fn test_impl_from_field() {
        let sink = FieldSink::from(SinkConfig {
            name: "file".to_string(),
        });
        assert_eq!(sink.config.name, "file");
    }

    #[test]
    fn test_impl_box_from() {
        let boxed: Box<dyn Named> = Box::new(NamedSink::from(SinkConfig {
            name: "memory".to_string(),
        }))
        .into();
        assert_eq!(boxed.name(), "memory");
    }
}
