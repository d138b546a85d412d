//! Payment button markup template
//!
//! The form posts the widget's opaque token to the callback URL. The
//! response handler copies descriptor and value into the hidden fields
//! and submits on success; on tokenization failure it logs each
//! gateway message (`code: text`) to the console and leaves the form
//! unsubmitted.

/// Placeholder keys the button template expects, in no particular order
pub const PLACEHOLDERS: &[&str] = &[
    "callbackUrl",
    "apiLoginId",
    "publicClientKey",
    "buttonLabel",
    "styleOverride",
    "acceptJsUrl",
];

/// Get the payment button template
pub fn get_button_template() -> &'static str {
    r#"<form id="paymentForm"
    method="POST"
    action="{{callbackUrl}}">
    <input type="hidden" name="dataValue" id="dataValue" />
    <input type="hidden" name="dataDescriptor" id="dataDescriptor" />
    <button type="button"
        class="AcceptUI"
        data-billingAddressOptions='{"show":true, "required":false}'
        data-apiLoginID="{{apiLoginId}}"
        data-clientKey="{{publicClientKey}}"
        data-acceptUIFormBtnTxt="Submit"
        data-acceptUIFormHeaderTxt="Payment Information"
        data-responseHandler="responseHandler"
        style="{{styleOverride}}"
        >{{buttonLabel}}
    </button>
</form>

<script type="text/javascript"
    src="{{acceptJsUrl}}"
    charset="utf-8">
</script>

<script type="text/javascript">
function responseHandler(response) {
    if (response.messages.resultCode === "Error") {
        var i = 0;
        while (i < response.messages.message.length) {
            console.log(
                response.messages.message[i].code + ": " +
                response.messages.message[i].text
            );
            i = i + 1;
        }
    } else {
        paymentFormUpdate(response.opaqueData);
    }
}

function paymentFormUpdate(opaqueData) {
    document.getElementById("dataDescriptor").value = opaqueData.dataDescriptor;
    document.getElementById("dataValue").value = opaqueData.dataValue;
    document.getElementById("paymentForm").submit();
}
</script>
"#
}
