//! Console interception script injected into every preview
//!
//! The script replaces `console.log` and `console.error` inside the preview
//! frame with versions that post a relay message to the parent window and
//! then call the original function. It also reports uncaught errors.

use crate::relay::{ERROR_EVENT, LOG_EVENT};

/// Text posted in place of an object `JSON.stringify` cannot handle
pub const UNSERIALIZABLE_PLACEHOLDER: &str = "[Unserializable Object]";

const TEMPLATE: &str = r#"
<script>
  (function () {
    var originalLog = console.log;
    var originalError = console.error;

    function safeStringify(value) {
      try {
        return JSON.stringify(value, null, 2);
      } catch (e) {
        return '__PLACEHOLDER__';
      }
    }

    function serialize(args) {
      return Array.prototype.map.call(args, function (arg) {
        return typeof arg === 'object' ? safeStringify(arg) : String(arg);
      }).join(' ');
    }

    console.log = function () {
      window.parent.postMessage({ type: '__LOG_EVENT__', message: serialize(arguments) }, '__TARGET_ORIGIN__');
      originalLog.apply(console, arguments);
    };

    console.error = function () {
      window.parent.postMessage({ type: '__ERROR_EVENT__', message: serialize(arguments) }, '__TARGET_ORIGIN__');
      originalError.apply(console, arguments);
    };

    window.addEventListener('error', function (event) {
      window.parent.postMessage({
        type: '__ERROR_EVENT__',
        message: 'Uncaught Error: ' + event.message + ' at ' + event.filename + ':' + event.lineno
      }, '__TARGET_ORIGIN__');
    });
  })();
</script>
"#;

/// Parameters substituted into the interception script
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InterceptorShim {
    pub log_event: &'static str,
    pub error_event: &'static str,
    /// `postMessage` target origin
    pub target_origin: &'static str,
    pub unserializable: &'static str,
}

impl Default for InterceptorShim {
    fn default() -> Self {
        Self {
            log_event: LOG_EVENT,
            error_event: ERROR_EVENT,
            target_origin: "*",
            unserializable: UNSERIALIZABLE_PLACEHOLDER,
        }
    }
}

impl InterceptorShim {
    /// The `<script>` block to inject
    pub fn render(&self) -> String {
        TEMPLATE
            .replace("__LOG_EVENT__", self.log_event)
            .replace("__ERROR_EVENT__", self.error_event)
            .replace("__TARGET_ORIGIN__", self.target_origin)
            .replace("__PLACEHOLDER__", self.unserializable)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_substitutes_every_token() {
        let script = InterceptorShim::default().render();
        assert!(!script.contains("__"));
        assert!(script.trim_start().starts_with("<script>"));
        assert!(script.trim_end().ends_with("</script>"));
    }

    #[test]
    fn test_render_posts_both_event_types() {
        let script = InterceptorShim::default().render();
        assert!(script.contains("type: 'console_log'"));
        assert!(script.contains("type: 'console_error'"));
        assert!(script.contains("'Uncaught Error: ' + event.message"));
        assert!(script.contains("'[Unserializable Object]'"));
        assert!(script.contains("}, '*');"));
    }

    #[test]
    fn test_custom_origin() {
        let shim = InterceptorShim {
            target_origin: "https://quill.local",
            ..InterceptorShim::default()
        };
        assert!(shim.render().contains("'https://quill.local'"));
    }
}
