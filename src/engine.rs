use std::sync::Once;
use std::time::Instant;

use v8::{Context, Function, Global, OwnedIsolate};

use crate::bundle::Bundle;
use crate::error::{Error, Result};
use crate::options::RenderOptions;

static PLATFORM: Once = Once::new();

fn init_platform() {
    PLATFORM.call_once(|| {
        let platform = v8::new_default_platform(0, false).make_shared();
        v8::V8::initialize_platform(platform);
        v8::V8::initialize();
        log::debug!("V8 {} initialized", v8::V8::get_version());
    });
}

fn create_origin<'s>(
    scope: &mut v8::HandleScope<'s>,
    filename: impl AsRef<str>,
    is_module: bool,
) -> Option<v8::ScriptOrigin<'s>> {
    let name: v8::Local<'s, v8::Value> = v8::String::new(scope, filename.as_ref())?.into();
    Some(v8::ScriptOrigin::new(
        scope, name, 0, 0, false, 0, name, false, false, is_module,
    ))
}

// The bundle is self-contained; any import is an error.
fn module_callback<'s>(
    context: v8::Local<'s, v8::Context>,
    specifier: v8::Local<'s, v8::String>,
    _assertions: v8::Local<'s, v8::FixedArray>,
    _referrer: v8::Local<'s, v8::Module>,
) -> Option<v8::Local<'s, v8::Module>> {
    let scope = &mut unsafe { v8::CallbackScope::new(context) };
    let message = format!(
        "cannot import '{}': bundle must be self-contained",
        specifier.to_rust_string_lossy(scope)
    );
    let message = v8::String::new(scope, &message)?;
    let exception = v8::Exception::type_error(scope, message);
    scope.throw_exception(exception);
    None
}

fn describe_exception<'s>(
    scope: &mut v8::HandleScope<'s>,
    exception: Option<v8::Local<'_, v8::Value>>,
) -> String {
    match exception {
        Some(exception) => exception.to_rust_string_lossy(scope),
        None => "unknown JavaScript exception".to_owned(),
    }
}

/// MathJax running in a V8 isolate.
///
/// Setup compiles and evaluates the bundle once; each [`Engine::convert`]
/// call then invokes its default export.
pub struct Engine {
    // Handles are released before the isolate that owns them.
    function: Global<Function>,
    context: Global<Context>,
    isolate: OwnedIsolate,
}

impl Engine {
    /// Initialization: compile the bundle as a module and keep its default export.
    pub fn new(bundle: &Bundle) -> Result<Self> {
        init_platform();
        let started = Instant::now();

        let mut isolate = v8::Isolate::new(Default::default());
        let (context, function) = {
            let handle_scope = &mut v8::HandleScope::new(&mut isolate);
            let context = v8::Context::new(handle_scope);
            let global_context = Global::new(handle_scope, context);

            let scope = &mut v8::ContextScope::new(handle_scope, context);
            let function = load_default_export(scope, bundle)?;
            (global_context, function)
        };

        log::debug!(
            "engine ready from {} in {:?}",
            bundle.name(),
            started.elapsed()
        );
        Ok(Self {
            function,
            context,
            isolate,
        })
    }

    /// Convert a TeX string to SVG markup.
    pub fn convert(&mut self, tex: impl AsRef<str>, options: &RenderOptions) -> Result<String> {
        let started = Instant::now();
        let handle_scope = &mut v8::HandleScope::new(&mut self.isolate);
        let context = v8::Local::new(handle_scope, &self.context);
        let scope = &mut v8::ContextScope::new(handle_scope, context);
        let tc = &mut v8::TryCatch::new(scope);

        let function = v8::Local::new(tc, &self.function);
        let tex = v8::String::new(tc, tex.as_ref()).ok_or(Error::StringAlloc)?;
        let mut packages: Vec<v8::Local<v8::Value>> = Vec::with_capacity(options.extensions.len());
        for extension in &options.extensions {
            let name = v8::String::new(tc, extension).ok_or(Error::StringAlloc)?;
            packages.push(name.into());
        }
        let packages = v8::Array::new_with_elements(tc, &packages);
        let inline = v8::Boolean::new(tc, options.inline);

        let args: [v8::Local<v8::Value>; 3] = [tex.into(), packages.into(), inline.into()];
        let recv: v8::Local<v8::Value> = v8::undefined(tc).into();
        let Some(result) = function.call(tc, recv, &args) else {
            let exception = tc.exception();
            return Err(Error::Conversion(describe_exception(tc, exception)));
        };
        if !result.is_string() {
            let kind = result.type_of(tc).to_rust_string_lossy(tc);
            return Err(Error::UnexpectedResult(kind));
        }

        let svg = result.to_rust_string_lossy(tc);
        log::debug!(
            "converted {} characters of TeX (inline: {}) in {:?}",
            tex.length(),
            options.inline,
            started.elapsed()
        );
        Ok(svg)
    }
}

fn load_default_export(
    scope: &mut v8::HandleScope,
    bundle: &Bundle,
) -> Result<Global<Function>> {
    let tc = &mut v8::TryCatch::new(scope);

    // Load js file
    let source = v8::String::new(tc, bundle.source()).ok_or(Error::StringAlloc)?;
    let origin = create_origin(tc, bundle.name(), true).ok_or(Error::StringAlloc)?;
    let source = v8::script_compiler::Source::new(source, Some(&origin));
    let Some(module) = v8::script_compiler::compile_module(tc, source) else {
        let exception = tc.exception();
        return Err(Error::Compile(describe_exception(tc, exception)));
    };

    // Instantiate module
    if module.instantiate_module(tc, module_callback) != Some(true) {
        let exception = tc.exception();
        return Err(Error::Instantiate(describe_exception(tc, exception)));
    }

    let evaluated = module.evaluate(tc);
    tc.perform_microtask_checkpoint();
    if evaluated.is_none() || module.get_status() == v8::ModuleStatus::Errored {
        let exception = if module.get_status() == v8::ModuleStatus::Errored {
            Some(module.get_exception())
        } else {
            tc.exception()
        };
        return Err(Error::Evaluate(describe_exception(tc, exception)));
    }

    let key = v8::String::new(tc, "default").ok_or(Error::StringAlloc)?;
    let namespace = module
        .get_module_namespace()
        .to_object(tc)
        .ok_or(Error::MissingExport)?;
    let export = namespace
        .get(tc, key.into())
        .ok_or(Error::MissingExport)?;
    let function = v8::Local::<v8::Function>::try_from(export).map_err(|_| Error::MissingExport)?;
    Ok(Global::new(tc, function))
}
